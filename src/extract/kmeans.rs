//! Palette quantization by k-means clustering in CIE Lab.
//!
//! Sampled pixels are converted to Lab and clustered with `kmeans_colors`. Centroids are
//! returned as colors, the largest cluster first.

use indexmap::IndexSet;
use kmeans_colors::{Sort, get_kmeans};
use palette::{FromColor, Lab, Srgb};

use super::ExtractError;
use crate::state::color::HexColor;

const MAX_ITERATIONS: usize = 20;
const CONVERGENCE: f32 = 1e-4;
const SEED: u64 = 0;
const MIN_ALPHA: u8 = 125;
const WHITE_THRESHOLD: u8 = 250;

fn to_lab([r, g, b]: [u8; 3]) -> Lab {
    Lab::from_color(Srgb::new(r, g, b).into_format::<f32>())
}

fn to_hex(lab: Lab) -> HexColor {
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(lab).into_format();
    HexColor::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Cluster an RGBA buffer into at most `palette_size` colors, most populated first.
///
/// Pixels with alpha below 125 and near-white pixels are skipped. The clustering seed is
/// fixed, so the same buffer always yields the same palette.
pub fn quantize(
    pixels: &[u8],
    palette_size: usize,
    quality: usize,
) -> Result<Vec<HexColor>, ExtractError> {
    if pixels.len() % 4 != 0 {
        return Err(ExtractError::Truncated { len: pixels.len() });
    }

    let mut distinct = IndexSet::new();
    let mut lab_pixels = Vec::new();
    for pixel in pixels.chunks_exact(4).step_by(quality.max(1)) {
        let [r, g, b, a] = [pixel[0], pixel[1], pixel[2], pixel[3]];
        if a < MIN_ALPHA || (r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD) {
            continue;
        }
        distinct.insert([r, g, b]);
        lab_pixels.push(to_lab([r, g, b]));
    }
    if lab_pixels.is_empty() {
        return Err(ExtractError::NoColors);
    }

    // k-means++ seeding needs at least k distinct points.
    let k = palette_size.max(1).min(distinct.len());
    let result = get_kmeans(k, MAX_ITERATIONS, CONVERGENCE, false, &lab_pixels, SEED);

    let mut clusters = Lab::sort_indexed_colors(&result.centroids, &result.indices);
    clusters.retain(|cluster| cluster.percentage > 0.0);
    clusters.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    let palette: IndexSet<HexColor> = clusters
        .into_iter()
        .map(|cluster| to_hex(cluster.centroid))
        .collect();
    Ok(palette.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(pixel: [u8; 4], count: usize) -> Vec<u8> {
        std::iter::repeat_n(pixel, count).flatten().collect()
    }

    fn close(actual: u8, expected: u8) -> bool {
        actual.abs_diff(expected) <= 2
    }

    #[test]
    fn solid_color_quantizes_to_itself() {
        let pixels = repeat([200, 40, 16, 255], 400);
        let colors = quantize(&pixels, 10, 1).unwrap();
        assert_eq!(colors.len(), 1);
        let [r, g, b] = colors[0].rgb();
        assert!(close(r, 200) && close(g, 40) && close(b, 16), "{colors:?}");
    }

    #[test]
    fn largest_cluster_comes_first() {
        let mut pixels = repeat([0, 0, 250, 255], 200);
        pixels.extend(repeat([250, 0, 0, 255], 300));
        pixels.extend(repeat([0, 200, 0, 255], 100));
        let colors = quantize(&pixels, 10, 1).unwrap();

        let channels: Vec<[u8; 3]> = colors.iter().map(HexColor::rgb).collect();
        assert_eq!(channels.len(), 3);
        assert!(channels[0][0] > 240, "{colors:?}");
        assert!(channels[1][2] > 240, "{colors:?}");
        assert!(channels[2][1] > 190, "{colors:?}");
    }

    #[test]
    fn same_pixels_give_the_same_palette() {
        let pixels: Vec<u8> = (0..4096u32)
            .flat_map(|i| [(i % 256) as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8, 255])
            .collect();
        let first = quantize(&pixels, 10, 1).unwrap();
        let second = quantize(&pixels, 10, 1).unwrap();
        assert!(!first.is_empty());
        assert!(first.len() <= 10);
        assert_eq!(first, second);
    }

    #[test]
    fn skips_translucent_and_white_pixels() {
        let mut pixels = repeat([255, 255, 255, 255], 100);
        pixels.extend(repeat([10, 10, 10, 100], 100));
        assert!(matches!(quantize(&pixels, 10, 1), Err(ExtractError::NoColors)));

        pixels.extend(repeat([0, 128, 0, 255], 1));
        let colors = quantize(&pixels, 10, 1).unwrap();
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn rejects_truncated_buffers() {
        assert!(matches!(
            quantize(&[1, 2, 3], 10, 1),
            Err(ExtractError::Truncated { len: 3 })
        ));
    }
}
