//! Luminance statistics: mean, spread, clipping and shadow variance.

use image::RgbImage;

use super::histogram::Histogram;
use crate::config::ValidationConfig;

/// Rec. 709 luma of an 8-bit RGB pixel.
#[must_use]
pub fn luma(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb.map(f64::from);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn luma_bin(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Photometric statistics of a whole image.
#[derive(Debug, Clone)]
pub struct LumaStats {
    /// Histogram of rounded luma values.
    pub histogram: Histogram,
    /// Mean luma.
    pub mean: f64,
    /// Population standard deviation of luma.
    pub std_dev: f64,
    /// Fraction of pixels at or above the highlight level.
    pub highlight_clip: f64,
    /// Fraction of pixels at or below the shadow level.
    pub shadow_clip: f64,
    /// Variance of luma within the shadow percentile band.
    pub shadow_variance: f64,
}

impl LumaStats {
    /// Computes statistics over every pixel of `image`.
    ///
    /// Pixels are visited in row-major order so results are reproducible
    /// bit for bit.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute(image: &RgbImage, config: &ValidationConfig) -> Self {
        let values: Vec<f64> = image.pixels().map(|p| luma(p.0)).collect();
        let histogram = Histogram::from_values(values.iter().copied().map(luma_bin));

        let (mean, variance) = mean_and_variance(values.iter().copied());

        let shadow_ceiling = histogram.percentile(config.shadow_percentile);
        let (_, shadow_variance) = mean_and_variance(
            values
                .iter()
                .copied()
                .filter(|&v| luma_bin(v) <= shadow_ceiling),
        );

        Self {
            highlight_clip: histogram.fraction_at_or_above(config.highlight_level),
            shadow_clip: histogram.fraction_at_or_below(config.shadow_level),
            histogram,
            mean,
            std_dev: variance.sqrt(),
            shadow_variance,
        }
    }
}

/// Population mean and variance; zero for an empty sequence.
#[allow(clippy::cast_precision_loss)]
fn mean_and_variance(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let (count, sum) = values
        .clone()
        .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    let squares: f64 = values.map(|v| (v - mean) * (v - mean)).sum();
    (mean, squares / count as f64)
}
