//! Exact-color frequency counting.

use indexmap::IndexMap;

use super::ExtractError;
use crate::state::color::HexColor;

/// Count every RGB value in an RGBA buffer (alpha ignored) and return the `top_k` most
/// frequent, most common first.
///
/// The counts live in an insertion-ordered map and the sort is stable, so colors with
/// equal counts keep the order in which they were first seen.
pub fn most_frequent(pixels: &[u8], top_k: usize) -> Result<Vec<HexColor>, ExtractError> {
    if pixels.len() % 4 != 0 {
        return Err(ExtractError::Truncated { len: pixels.len() });
    }

    let mut counts: IndexMap<[u8; 3], usize> = IndexMap::new();
    for pixel in pixels.chunks_exact(4) {
        *counts.entry([pixel[0], pixel[1], pixel[2]]).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return Err(ExtractError::NoColors);
    }

    let mut ranked: Vec<([u8; 3], usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .into_iter()
        .take(top_k.max(1))
        .map(|([r, g, b], _)| HexColor::from_rgb(r, g, b))
        .collect())
}
