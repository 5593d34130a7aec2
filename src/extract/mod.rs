//! Color extraction from uploaded images.
//!
//! Two strategies are offered: counting exact pixel colors ([`frequency`]) and palette
//! quantization through k-means clustering in Lab ([`kmeans`]).

pub mod frequency;
pub mod kmeans;

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::state::color::HexColor;

/// Extraction strategy requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMethod {
    /// Most frequent exact colors first.
    #[default]
    Frequency,
    /// k-means quantized palette.
    Palette,
}

/// Tunables for both strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSettings {
    /// How many colors frequency extraction keeps.
    pub top_k: usize,
    /// How many colors the quantizer may return.
    pub palette_size: usize,
    /// Sampling stride of the quantizer, 1 reads every pixel.
    pub quality: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            palette_size: 10,
            quality: 10,
        }
    }
}

/// Why no colors could be produced.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The bytes are not an image the decoder understands.
    #[error("failed to decode image")]
    Decode {
        /// Decoder failure.
        #[source]
        source: image::ImageError,
    },
    /// A raw RGBA buffer whose length is not a multiple of four.
    #[error("pixel buffer length {len} is not a multiple of 4")]
    Truncated {
        /// Length of the rejected buffer.
        len: usize,
    },
    /// Nothing usable in the image (empty, or every pixel filtered out).
    #[error("image contains no usable pixels")]
    NoColors,
}

/// Decode `bytes` and extract colors with the requested strategy.
pub fn extract_colors(
    bytes: &[u8],
    method: ExtractMethod,
    settings: &ExtractSettings,
) -> Result<Vec<HexColor>, ExtractError> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| ExtractError::Decode { source })?
        .to_rgba8();
    let pixels = image.as_raw();

    match method {
        ExtractMethod::Frequency => frequency::most_frequent(pixels, settings.top_k),
        ExtractMethod::Palette => kmeans::quantize(pixels, settings.palette_size, settings.quality),
    }
}
