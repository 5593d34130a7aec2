//! Rhombus silhouette shared by both renderers.
//!
//! The mask works on any surface, so it does not care which generator filled it.

use tiny_skia::{FillRule, Mask, Path, PathBuilder, Pixmap, Transform};

use super::RenderError;

/// Path of the diamond inside the `0 0 100 100` SVG viewBox.
pub const SVG_PATH: &str = "M50 0 L100 50 L50 100 L0 50 Z";

/// Top, right, bottom and left vertices of the rhombus inscribed in a `width` x `height`
/// rectangle anchored at the origin.
pub fn vertices(width: f32, height: f32) -> [(f32, f32); 4] {
    [
        (width / 2.0, 0.0),
        (width, height / 2.0),
        (width / 2.0, height),
        (0.0, height / 2.0),
    ]
}

/// Closed rhombus path through [`vertices`].
pub fn diamond_path(width: f32, height: f32) -> Option<Path> {
    let [top, right, bottom, left] = vertices(width, height);
    let mut builder = PathBuilder::new();
    builder.move_to(top.0, top.1);
    builder.line_to(right.0, right.1);
    builder.line_to(bottom.0, bottom.1);
    builder.line_to(left.0, left.1);
    builder.close();
    builder.finish()
}

/// Clip a fully painted surface to the diamond.
///
/// Pixels whose centers fall inside the rhombus keep their value and every other pixel
/// becomes transparent. Every regeneration repaints the full rectangle, so this has to run
/// again after each one.
pub fn apply_diamond_mask(surface: &mut Pixmap) -> Result<(), RenderError> {
    let (width, height) = (surface.width(), surface.height());
    let path = diamond_path(width as f32, height as f32)
        .ok_or(RenderError::Geometry("diamond path"))?;
    let mut mask = Mask::new(width, height).ok_or(RenderError::EmptySurface { width, height })?;
    // Hard edges: a pixel is either kept as is or cleared.
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    surface.apply_mask(&mask);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tiny_skia::Color;

    use super::*;

    fn painted(width: u32, height: u32) -> Pixmap {
        let mut surface = Pixmap::new(width, height).unwrap();
        surface.fill(Color::from_rgba8(10, 20, 30, 255));
        surface
    }

    fn rgba(surface: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let pixel = surface.pixel(x, y).unwrap();
        [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
    }

    #[test]
    fn vertices_are_edge_midpoints() {
        assert_eq!(
            vertices(100.0, 100.0),
            [(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)]
        );
    }

    #[test]
    fn mask_clears_corners_and_keeps_interior() {
        let mut surface = painted(64, 64);
        apply_diamond_mask(&mut surface).unwrap();

        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63), (8, 8), (55, 55)] {
            assert_eq!(rgba(&surface, x, y), [0, 0, 0, 0], "pixel ({x}, {y})");
        }
        for (x, y) in [(32, 32), (32, 4), (4, 32), (59, 32), (32, 59)] {
            assert_eq!(rgba(&surface, x, y), [10, 20, 30, 255], "pixel ({x}, {y})");
        }
    }

    #[test]
    fn mask_keeps_or_clears_without_blending() {
        let mut surface = painted(40, 40);
        apply_diamond_mask(&mut surface).unwrap();
        for pixel in surface.pixels() {
            let value = [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()];
            assert!(value == [0, 0, 0, 0] || value == [10, 20, 30, 255], "{value:?}");
        }
    }

    #[test]
    fn mask_is_idempotent() {
        let mut once = painted(31, 17);
        apply_diamond_mask(&mut once).unwrap();
        let mut twice = once.clone();
        apply_diamond_mask(&mut twice).unwrap();
        assert_eq!(once.data(), twice.data());
    }
}
