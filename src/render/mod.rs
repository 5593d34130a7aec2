//! Diamond logo renderers: the SVG linear gradient, the procedural mesh gradient and the
//! rhombus mask applied to rasters.

pub mod diamond;
pub mod export;
pub mod linear;
pub mod mesh;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiny_skia::Pixmap;
use utoipa::ToSchema;

/// Which renderer draws the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Declarative SVG linear gradient, rotated by the session angle.
    #[default]
    Linear,
    /// Procedural mesh gradient, rasterized and masked.
    Mesh,
}

impl RenderMode {
    /// Smallest color list this mode can draw.
    pub fn min_colors(self) -> usize {
        match self {
            RenderMode::Linear => 1,
            RenderMode::Mesh => 2,
        }
    }
}

/// Failures raised while drawing or encoding a logo.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer was handed fewer colors than it can draw.
    #[error("{mode:?} rendering needs at least {min} colors, got {actual}")]
    NotEnoughColors {
        /// Renderer that refused the list.
        mode: RenderMode,
        /// Colors the renderer needs.
        min: usize,
        /// Colors it was given.
        actual: usize,
    },
    /// The surface could not be allocated (zero or oversized dimensions).
    #[error("invalid raster size {width}x{height}")]
    EmptySurface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The rasterizer rejected a path or shader.
    #[error("could not build the {0}")]
    Geometry(&'static str),
    /// PNG encoding failed.
    #[error("failed to encode PNG")]
    Encode {
        /// Encoder failure.
        #[source]
        source: image::ImageError,
    },
}

pub(crate) fn ensure_colors(mode: RenderMode, actual: usize) -> Result<(), RenderError> {
    let min = mode.min_colors();
    if actual < min {
        return Err(RenderError::NotEnoughColors { mode, min, actual });
    }
    Ok(())
}

/// Transparent `width` x `height` surface.
pub(crate) fn new_surface(width: u32, height: u32) -> Result<Pixmap, RenderError> {
    Pixmap::new(width, height).ok_or(RenderError::EmptySurface { width, height })
}
