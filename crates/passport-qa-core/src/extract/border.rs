//! Background whiteness estimation over the image border band.
//!
//! The band width scales with the short side of the image, and every pixel in
//! the band is sampled exactly once, so the resulting fraction does not depend
//! on resolution.

use image::RgbImage;

/// Width in pixels of the border band for an image of the given size.
///
/// At least one pixel, at most half the short side.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn band_width(width: u32, height: u32, fraction: f64) -> u32 {
    let short = width.min(height);
    let scaled = (fraction * f64::from(short)).round();
    let band = if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    };
    band.clamp(1, (short / 2).max(1))
}

/// Whether a pixel is bright and close to neutral.
#[must_use]
pub fn is_near_white(rgb: [u8; 3], level: u8, max_spread: u8) -> bool {
    let max = rgb.iter().copied().max().unwrap_or(0);
    let min = rgb.iter().copied().min().unwrap_or(0);
    min >= level && max - min <= max_spread
}

/// Fraction of border band pixels that are near-white.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn border_whiteness(image: &RgbImage, band: u32, level: u8, max_spread: u8) -> f64 {
    let (width, height) = image.dimensions();
    let in_band = |x: u32, y: u32| {
        x < band || y < band || x >= width.saturating_sub(band) || y >= height.saturating_sub(band)
    };

    let (sampled, white) = image
        .enumerate_pixels()
        .filter(|(x, y, _)| in_band(*x, *y))
        .fold((0u64, 0u64), |(n, w), (_, _, p)| {
            (n + 1, w + u64::from(is_near_white(p.0, level, max_spread)))
        });

    if sampled == 0 {
        return 0.0;
    }
    white as f64 / sampled as f64
}
