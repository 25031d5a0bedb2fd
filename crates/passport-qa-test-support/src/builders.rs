//! Synthetic image builders for testing.

use image::{DynamicImage, Rgb, RgbImage};
use passport_qa_core::domain::{FacialLandmarks, ImageInfo, Point};

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating flat images with specific
/// photometric characteristics.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Creates a uniform RGB image.
    #[must_use]
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb(rgb));
        ImageInfo::new("synthetic://uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates a uniform gray image.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, level: u8) -> ImageInfo {
        Self::uniform(width, height, [level; 3])
    }
}

/// A synthetic portrait together with the landmarks a detector would report.
#[derive(Debug, Clone)]
pub struct SyntheticPhoto {
    /// The rendered image.
    pub info: ImageInfo,
    /// Landmarks matching the rendered face.
    pub landmarks: FacialLandmarks,
}

impl SyntheticPhoto {
    /// The image as 8-bit RGB.
    #[must_use]
    pub fn rgb(&self) -> RgbImage {
        self.info.to_rgb8()
    }
}

/// Builder for passport-style portraits: a flat face block on a flat
/// background, optionally with a darker shoulder band along the bottom.
///
/// The default build is a compliant 600x600 photo: background 245, a face
/// block of value 95 spanning x 25%..75% and y 20%..80% (head ratio 0.60,
/// nose centred) and a mean luminance of 200.
#[derive(Debug, Clone)]
pub struct PassportPhotoBuilder {
    width: u32,
    height: u32,
    background: [u8; 3],
    face: [u8; 3],
    face_top: f64,
    face_bottom: f64,
    nose_offset: f64,
    shoulders: Option<(u32, [u8; 3])>,
    path: String,
}

impl Default for PassportPhotoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PassportPhotoBuilder {
    /// Starts from the compliant 600x600 portrait.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 600,
            height: 600,
            background: [245; 3],
            face: [95; 3],
            face_top: 0.2,
            face_bottom: 0.8,
            nose_offset: 0.0,
            shoulders: None,
            path: "synthetic://portrait".to_string(),
        }
    }

    /// Sets the image size.
    #[must_use]
    pub const fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the background colour.
    #[must_use]
    pub const fn background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    /// Sets the face block colour.
    #[must_use]
    pub const fn face(mut self, rgb: [u8; 3]) -> Self {
        self.face = rgb;
        self
    }

    /// Sets the forehead and chin rows as fractions of the height.
    #[must_use]
    pub fn face_span(mut self, top: f64, bottom: f64) -> Self {
        self.face_top = top;
        self.face_bottom = bottom;
        self
    }

    /// Moves the reported nose tip horizontally by `fraction` of the width.
    #[must_use]
    pub fn nose_offset(mut self, fraction: f64) -> Self {
        self.nose_offset = fraction;
        self
    }

    /// Paints the bottom `rows` rows in `rgb`.
    #[must_use]
    pub const fn shoulders(mut self, rows: u32, rgb: [u8; 3]) -> Self {
        self.shoulders = Some((rows, rgb));
        self
    }

    /// Sets the path recorded on the image.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Renders the portrait.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn build(self) -> SyntheticPhoto {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let left = (w * 0.25).round() as u32;
        let right = (w * 0.75).round() as u32;
        let top = (h * self.face_top).round() as u32;
        let bottom = (h * self.face_bottom).round() as u32;
        let shoulder_start = self
            .shoulders
            .map_or(self.height, |(rows, _)| self.height.saturating_sub(rows));

        let img = RgbImage::from_fn(self.width, self.height, |x, y| {
            if (left..right).contains(&x) && (top..bottom).contains(&y) {
                Rgb(self.face)
            } else if y >= shoulder_start {
                Rgb(self.shoulders.map_or(self.background, |(_, rgb)| rgb))
            } else {
                Rgb(self.background)
            }
        });

        let cx = w / 2.0;
        let mid = f64::from(top + bottom) / 2.0;
        let landmarks = FacialLandmarks {
            forehead_top: Point::new(cx, f64::from(top)),
            chin_bottom: Point::new(cx, f64::from(bottom)),
            nose_tip: Point::new(self.nose_offset.mul_add(w, cx), mid),
            left_face: Point::new(f64::from(left), mid),
            right_face: Point::new(f64::from(right), mid),
        };

        SyntheticPhoto {
            info: ImageInfo::new(self.path, DynamicImage::ImageRgb8(img)),
            landmarks,
        }
    }

    /// Compliant portrait (all rules pass under the default configuration).
    #[must_use]
    pub fn compliant() -> SyntheticPhoto {
        Self::new().build()
    }

    /// Compliant composition at 500x500, so only the size rule fails.
    #[must_use]
    pub fn wrong_size() -> SyntheticPhoto {
        Self::new().size(500, 500).build()
    }

    /// Portrait whose border band is exactly 70% near-white.
    ///
    /// At 600x600 the band is 30px wide and holds 68 400 pixels; a 72-row
    /// shoulder band covers 30 full rows plus 42 rows of side strips, which
    /// is 20 520 pixels or 30% of the band.
    #[must_use]
    pub fn gray_shoulders() -> SyntheticPhoto {
        Self::new().shoulders(72, [200; 3]).build()
    }

    /// Portrait lit far too dimly.
    #[must_use]
    pub fn underexposed() -> SyntheticPhoto {
        Self::new().background([40; 3]).face([20; 3]).build()
    }

    /// Portrait with a blown-out background.
    #[must_use]
    pub fn overexposed() -> SyntheticPhoto {
        Self::new().background([255; 3]).build()
    }
}
