//! Procedural mesh gradient.
//!
//! A generator turns `(colors, seed)` into a full rectangular raster; the diamond is cut
//! out afterwards by [`render_masked`], whichever generator produced the pixels.

use std::f32::consts::TAU;

use palette::{Clamp, FromColor, Oklab, Srgb};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tiny_skia::{ColorU8, Pixmap};

use super::{RenderError, RenderMode, diamond::apply_diamond_mask, ensure_colors, new_surface};
use crate::state::color::HexColor;

/// Lowest mesh position seed handed out by the session layer.
pub const MESH_SEED_MIN: u32 = 1;

/// Deterministic raster producer: the same colors, seed and size always give the same pixels.
pub trait MeshGenerator: Send + Sync {
    /// Fill a `width` x `height` rectangle with a blend of `colors` laid out by `seed`.
    fn render(
        &self,
        colors: &[HexColor],
        seed: u32,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RenderError>;
}

/// Full regeneration followed by the diamond mask.
pub fn render_masked(
    generator: &dyn MeshGenerator,
    colors: &[HexColor],
    seed: u32,
    size: u32,
) -> Result<Pixmap, RenderError> {
    let mut surface = generator.render(colors, seed, size, size)?;
    apply_diamond_mask(&mut surface)?;
    Ok(surface)
}

/// Position of a color's influence on the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Horizontal position, `0.0` at the left edge.
    pub x: f32,
    /// Vertical position, `0.0` at the top edge.
    pub y: f32,
}

/// Inverse-distance (Shepard) blend of one control point per color, mixed in Oklab, with
/// a gentle sinusoidal warp so the bands bend instead of forming cones.
#[derive(Debug, Clone)]
pub struct ShepardMesh {
    falloff: f32,
    warp: f32,
}

impl Default for ShepardMesh {
    fn default() -> Self {
        Self {
            falloff: 1.6,
            warp: 0.06,
        }
    }
}

struct Warp {
    frequency: f32,
    phase_x: f32,
    phase_y: f32,
}

impl ShepardMesh {
    /// Control point layout selected by `seed` for `count` colors.
    pub fn layout(&self, seed: u32, count: usize) -> Vec<ControlPoint> {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        (0..count)
            .map(|_| ControlPoint {
                x: rng.random::<f32>(),
                y: rng.random::<f32>(),
            })
            .collect()
    }

    fn warp(&self, seed: u32) -> Warp {
        // Separate stream so the warp does not shift with the number of colors.
        let mut rng = StdRng::seed_from_u64(u64::from(seed).rotate_left(32) ^ 0x9e37_79b9);
        Warp {
            frequency: rng.random_range(1.0..2.5),
            phase_x: rng.random_range(0.0..TAU),
            phase_y: rng.random_range(0.0..TAU),
        }
    }
}

impl MeshGenerator for ShepardMesh {
    fn render(
        &self,
        colors: &[HexColor],
        seed: u32,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RenderError> {
        ensure_colors(RenderMode::Mesh, colors.len())?;
        let mut surface = new_surface(width, height)?;

        let points = self.layout(seed, colors.len());
        let warp = self.warp(seed);
        let labs: Vec<Oklab> = colors
            .iter()
            .map(|color| Oklab::from_color(color.to_srgb()))
            .collect();

        for (index, pixel) in surface.pixels_mut().iter_mut().enumerate() {
            let (px, py) = (index as u32 % width, index as u32 / width);
            let u = (px as f32 + 0.5) / width as f32;
            let v = (py as f32 + 0.5) / height as f32;
            let wu = u + self.warp * (v * TAU * warp.frequency + warp.phase_x).sin();
            let wv = v + self.warp * (u * TAU * warp.frequency + warp.phase_y).sin();

            let (mut l, mut a, mut b, mut total) = (0.0_f32, 0.0_f32, 0.0_f32, 0.0_f32);
            for (point, lab) in points.iter().zip(&labs) {
                let dx = wu - point.x;
                let dy = wv - point.y;
                let weight = (dx * dx + dy * dy + 1.0e-6).powf(-self.falloff);
                l += lab.l * weight;
                a += lab.a * weight;
                b += lab.b * weight;
                total += weight;
            }

            let mixed = Oklab::new(l / total, a / total, b / total);
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(mixed).clamp().into_format();
            *pixel = ColorU8::from_rgba(rgb.red, rgb.green, rgb.blue, 255).premultiply();
        }
        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(values: &[&str]) -> Vec<HexColor> {
        values.iter().map(|v| HexColor::parse(v).unwrap()).collect()
    }

    #[test]
    fn same_seed_and_colors_reproduce_the_layout() {
        let palette = colors(&["#FF0000", "#00FF00", "#0000FF"]);
        let first = render_masked(&ShepardMesh::default(), &palette, 42, 48).unwrap();
        let second = render_masked(&ShepardMesh::default(), &palette, 42, 48).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn different_seeds_move_control_points() {
        let mesh = ShepardMesh::default();
        assert_ne!(mesh.layout(1, 3), mesh.layout(2, 3));
        assert_eq!(mesh.layout(7, 4), mesh.layout(7, 4));
    }

    #[test]
    fn refuses_a_single_color() {
        let result = ShepardMesh::default().render(&colors(&["#FFFFFF"]), 1, 8, 8);
        assert!(matches!(
            result,
            Err(RenderError::NotEnoughColors { min: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn masked_output_is_transparent_outside_the_diamond() {
        let palette = colors(&["#FF5733", "#FFC300"]);
        let image = render_masked(&ShepardMesh::default(), &palette, 500, 32).unwrap();
        let alpha = |x, y| image.pixel(x, y).unwrap().alpha();
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(31, 31), 0);
        assert_eq!(alpha(16, 16), 255);
    }

    #[test]
    fn identical_colors_blend_to_that_color() {
        let palette = colors(&["#3366CC", "#3366CC"]);
        let image = ShepardMesh::default().render(&palette, 9, 16, 16).unwrap();
        for pixel in image.pixels() {
            let [r, g, b, a] = [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()];
            assert!(r.abs_diff(0x33) <= 1 && g.abs_diff(0x66) <= 1 && b.abs_diff(0xCC) <= 1);
            assert_eq!(a, 255);
        }
    }
}
