//! Downloadable artifacts produced from a rendered logo.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tiny_skia::Pixmap;

use super::RenderError;

/// File name of the vector export.
pub const SVG_FILENAME: &str = "diamond_logo.svg";
/// File name of the rasterized linear gradient.
pub const LINEAR_PNG_FILENAME: &str = "diamond_logo.png";
/// File name of the mesh gradient bitmap.
pub const MESH_PNG_FILENAME: &str = "diamond_mesh_gradient.png";

const SVG_CONTENT_TYPE: &str = "image/svg+xml;charset=utf-8";
const PNG_CONTENT_TYPE: &str = "image/png";

/// Bytes ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Name offered in `Content-Disposition`.
    pub filename: &'static str,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Package SVG markup.
    pub fn svg(markup: String) -> Self {
        Self {
            filename: SVG_FILENAME,
            content_type: SVG_CONTENT_TYPE,
            bytes: markup.into_bytes(),
        }
    }

    /// Encode a raster surface as PNG under the given file name.
    pub fn png(filename: &'static str, surface: &Pixmap) -> Result<Self, RenderError> {
        Ok(Self {
            filename,
            content_type: PNG_CONTENT_TYPE,
            bytes: encode_png(&to_rgba_image(surface)?)?,
        })
    }
}

/// Straight-alpha copy of a premultiplied surface.
pub fn to_rgba_image(surface: &Pixmap) -> Result<RgbaImage, RenderError> {
    let (width, height) = (surface.width(), surface.height());
    let data = surface
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RgbaImage::from_raw(width, height, data).ok_or(RenderError::EmptySurface { width, height })
}

/// Encode RGBA pixels as a PNG file in memory.
pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    surface
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|source| RenderError::Encode { source })?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use tiny_skia::Color;

    use super::*;

    #[test]
    fn png_round_trips_through_the_decoder() {
        let mut surface = Pixmap::new(3, 2).unwrap();
        surface.fill(Color::from_rgba8(1, 2, 3, 255));
        let file = ExportFile::png(MESH_PNG_FILENAME, &surface).unwrap();
        assert_eq!(file.filename, "diamond_mesh_gradient.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(&file.bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&file.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert!(decoded.pixels().all(|pixel| pixel.0 == [1, 2, 3, 255]));
    }

    #[test]
    fn transparent_pixels_stay_transparent() {
        let surface = Pixmap::new(2, 2).unwrap();
        let image = to_rgba_image(&surface).unwrap();
        assert!(image.pixels().all(|pixel| pixel.0[3] == 0));
    }
}
