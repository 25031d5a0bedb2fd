//! Metrics extraction from a processed photo and its landmarks.

mod border;
mod histogram;
mod luminance;

pub use border::{band_width, border_whiteness, is_near_white};
pub use histogram::Histogram;
pub use luminance::{luma, LumaStats};

use image::RgbImage;
use tracing::debug;

use crate::config::ValidationConfig;
use crate::domain::{FacialLandmarks, Measurement, MetricsBundle, Unavailable};
use crate::error::ValidationError;

/// Measures everything the rules need.
///
/// Photometric metrics depend only on the image. Geometric metrics need
/// `landmarks`; without them they are marked unavailable.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidImage`] if the image has a zero dimension.
pub fn extract(
    image: &RgbImage,
    landmarks: Option<&FacialLandmarks>,
    config: &ValidationConfig,
) -> Result<MetricsBundle, ValidationError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ValidationError::invalid_image(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }

    let (head_ratio, nose_offset_fraction) = geometry(landmarks, width, height);

    let band = band_width(width, height, config.border_fraction);
    let border_whiteness_pct = border_whiteness(
        image,
        band,
        config.near_white_level,
        config.near_white_max_spread,
    );

    let luma = LumaStats::compute(image, config);

    debug!(
        width,
        height,
        band,
        border_whiteness_pct,
        luminance_mean = luma.mean,
        "extracted photo metrics"
    );

    Ok(MetricsBundle {
        image_width: width,
        image_height: height,
        head_ratio,
        nose_offset_fraction,
        border_whiteness_pct,
        border_band_px: band,
        luminance_mean: luma.mean,
        luminance_std: luma.std_dev,
        highlight_clip_pct: luma.highlight_clip,
        shadow_clip_pct: luma.shadow_clip,
        shadow_variance: luma.shadow_variance,
    })
}

fn geometry(
    landmarks: Option<&FacialLandmarks>,
    width: u32,
    height: u32,
) -> (Measurement, Measurement) {
    let Some(lm) = landmarks else {
        return (
            Measurement::unavailable(Unavailable::NoFaceDetected),
            Measurement::unavailable(Unavailable::NoFaceDetected),
        );
    };

    let head_ratio = if lm.is_consistent() {
        Measurement::available(lm.head_height() / f64::from(height))
    } else {
        Measurement::unavailable(Unavailable::InconsistentLandmarks)
    };

    let width = f64::from(width);
    let nose_offset = (lm.nose_tip.x - width / 2.0).abs() / width;

    (head_ratio, Measurement::available(nose_offset))
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::domain::Point;

    fn landmarks(forehead_y: f64, chin_y: f64, nose_x: f64) -> FacialLandmarks {
        FacialLandmarks {
            forehead_top: Point::new(300.0, forehead_y),
            chin_bottom: Point::new(300.0, chin_y),
            nose_tip: Point::new(nose_x, 250.0),
            left_face: Point::new(200.0, 250.0),
            right_face: Point::new(400.0, 250.0),
        }
    }

    fn gray(side: u32) -> RgbImage {
        RgbImage::from_pixel(side, side, Rgb([128, 128, 128]))
    }

    #[test]
    fn test_empty_image_is_invalid() {
        let image = RgbImage::new(0, 10);
        let err = extract(&image, None, &ValidationConfig::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidImage { .. }));
    }

    #[test]
    fn test_geometry_from_landmarks() {
        let lm = landmarks(120.0, 480.0, 312.0);
        let metrics = extract(&gray(600), Some(&lm), &ValidationConfig::default()).unwrap();

        let ratio = metrics.head_ratio.value().expect("head ratio measured");
        assert!((ratio - 0.6).abs() < 1e-9);
        let offset = metrics.nose_offset_fraction.value().expect("offset measured");
        assert!((offset - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_missing_landmarks_mark_geometry_unavailable() {
        let metrics = extract(&gray(600), None, &ValidationConfig::default()).unwrap();
        assert_eq!(
            metrics.head_ratio,
            Measurement::unavailable(Unavailable::NoFaceDetected)
        );
        assert_eq!(
            metrics.nose_offset_fraction,
            Measurement::unavailable(Unavailable::NoFaceDetected)
        );
        // Photometric metrics are still measured
        assert!((metrics.luminance_mean - 128.0).abs() < 1e-9);
        assert_eq!(metrics.border_band_px, 30);
    }

    #[test]
    fn test_inverted_landmarks_mark_head_ratio_only() {
        let lm = landmarks(480.0, 120.0, 300.0);
        let metrics = extract(&gray(600), Some(&lm), &ValidationConfig::default()).unwrap();
        assert_eq!(
            metrics.head_ratio,
            Measurement::unavailable(Unavailable::InconsistentLandmarks)
        );
        assert_eq!(metrics.nose_offset_fraction.value(), Some(0.0));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let image = RgbImage::from_fn(300, 300, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });
        let lm = landmarks(60.0, 240.0, 149.0);
        let config = ValidationConfig::default();

        let a = extract(&image, Some(&lm), &config).unwrap();
        let b = extract(&image, Some(&lm), &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.luminance_mean.to_bits(), b.luminance_mean.to_bits());
        assert_eq!(a.shadow_variance.to_bits(), b.shadow_variance.to_bits());
    }
}
