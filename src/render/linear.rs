//! SVG linear gradient clipped to the diamond, plus a rasterizer that evaluates the same
//! gradient the way an SVG user agent would.

use tiny_skia::{
    Color, GradientStop as ShaderStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode,
    Transform,
};

use super::{
    RenderError, RenderMode,
    diamond::{SVG_PATH, apply_diamond_mask},
    ensure_colors, new_surface,
};
use crate::state::color::HexColor;

const GRADIENT_ID: &str = "diamondGradient";
const SVG_SIZE: u32 = 200;

/// One anchor of the gradient, `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient vector.
    pub offset: f64,
    /// Color at that position.
    pub color: HexColor,
}

/// Evenly spaced stops: stop `i` of `L` sits at `i / (L - 1)`, a lone color at `0`.
pub fn gradient_stops(colors: &[HexColor]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1);
    colors
        .iter()
        .enumerate()
        .map(|(index, color)| GradientStop {
            offset: if last == 0 {
                0.0
            } else {
                index as f64 / last as f64
            },
            color: color.clone(),
        })
        .collect()
}

/// Percentage text for a stop offset, at most four decimals without trailing zeros.
pub fn format_offset(offset: f64) -> String {
    let text = format!("{:.4}", offset * 100.0);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}%")
}

/// Self-contained SVG document for the diamond logo.
///
/// Output depends only on `colors` and `angle`, so repeated exports are byte-identical.
pub fn svg_markup(colors: &[HexColor], angle: u16) -> Result<String, RenderError> {
    ensure_colors(RenderMode::Linear, colors.len())?;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_SIZE}" height="{SVG_SIZE}" viewBox="0 0 100 100">"#
    );
    svg.push_str(&format!(
        r#"<defs><linearGradient id="{GRADIENT_ID}" gradientTransform="rotate({angle})">"#
    ));
    for stop in gradient_stops(colors) {
        svg.push_str(&format!(
            r#"<stop offset="{}" stop-color="{}"/>"#,
            format_offset(stop.offset),
            stop.color
        ));
    }
    svg.push_str(&format!(
        r#"</linearGradient></defs><path d="{SVG_PATH}" fill="url(#{GRADIENT_ID})"/></svg>"#
    ));
    Ok(svg)
}

/// Rasterize the linear gradient into a `size` x `size` surface and clip it to the diamond.
///
/// The gradient vector runs from `(0, 0)` to `(1, 0)` in bounding-box units, is rotated by
/// `angle` degrees about the box origin and then scaled to the surface, with pad spreading
/// past both ends.
pub fn rasterize(colors: &[HexColor], angle: u16, size: u32) -> Result<Pixmap, RenderError> {
    ensure_colors(RenderMode::Linear, colors.len())?;
    let mut surface = new_surface(size, size)?;
    let extent = size as f32;

    let stops = gradient_stops(colors)
        .into_iter()
        .map(|stop| {
            let [r, g, b] = stop.color.rgb();
            ShaderStop::new(stop.offset as f32, Color::from_rgba8(r, g, b, 255))
        })
        .collect();
    let bounding_box = Transform::from_rotate(f32::from(angle)).post_scale(extent, extent);
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(1.0, 0.0),
        stops,
        SpreadMode::Pad,
        bounding_box,
    )
    .ok_or(RenderError::Geometry("linear gradient"))?;

    let rect =
        Rect::from_xywh(0.0, 0.0, extent, extent).ok_or(RenderError::Geometry("surface rect"))?;
    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = false;
    surface.fill_rect(rect, &paint, Transform::identity(), None);

    apply_diamond_mask(&mut surface)?;
    Ok(surface)
}
