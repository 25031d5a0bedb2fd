//! Configuration model for photo processing and validation.
//!
//! Every threshold here is a heuristic default, not a value taken from any
//! passport-issuing authority. Values are plain data: to change a threshold,
//! build a new configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest accepted output size for processed photos.
pub const MIN_PHOTO_SIZE: u32 = 200;

/// Accepted head-ratio band for processing targets.
pub const HEAD_RATIO_BAND: (f64, f64) = (0.50, 0.69);

/// Parameters of a photo processing request.
///
/// Deserialized values go through [`ProcessingParams::new`], so the range
/// checks apply to every instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProcessingParams")]
pub struct ProcessingParams {
    size: u32,
    head_ratio_target: f64,
    remove_background: bool,
}

impl ProcessingParams {
    /// Creates processing parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if `size` is below
    /// [`MIN_PHOTO_SIZE`] or `head_ratio_target` is outside [`HEAD_RATIO_BAND`].
    pub fn new(
        size: u32,
        head_ratio_target: f64,
        remove_background: bool,
    ) -> Result<Self, ConfigError> {
        if size < MIN_PHOTO_SIZE {
            return Err(ConfigError::OutOfRange {
                field: "size",
                expected: "at least 200 pixels",
                value: f64::from(size),
            });
        }
        let (lo, hi) = HEAD_RATIO_BAND;
        if !(lo..=hi).contains(&head_ratio_target) {
            return Err(ConfigError::OutOfRange {
                field: "head_ratio_target",
                expected: "within 0.50..=0.69",
                value: head_ratio_target,
            });
        }
        Ok(Self {
            size,
            head_ratio_target,
            remove_background,
        })
    }

    /// Output side length in pixels (the photo is square).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Target head height as a fraction of output height.
    #[must_use]
    pub const fn head_ratio_target(&self) -> f64 {
        self.head_ratio_target
    }

    /// Whether the background should be replaced with white.
    #[must_use]
    pub const fn remove_background(&self) -> bool {
        self.remove_background
    }

    /// Returns a copy with a different output size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if `size` is below [`MIN_PHOTO_SIZE`].
    pub fn with_size(self, size: u32) -> Result<Self, ConfigError> {
        Self::new(size, self.head_ratio_target, self.remove_background)
    }

    /// Returns a copy with background removal toggled.
    #[must_use]
    pub const fn with_remove_background(mut self, remove_background: bool) -> Self {
        self.remove_background = remove_background;
        self
    }
}

#[derive(Deserialize)]
struct RawProcessingParams {
    size: u32,
    head_ratio_target: f64,
    remove_background: bool,
}

impl TryFrom<RawProcessingParams> for ProcessingParams {
    type Error = ConfigError;

    fn try_from(raw: RawProcessingParams) -> Result<Self, Self::Error> {
        Self::new(raw.size, raw.head_ratio_target, raw.remove_background)
    }
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            size: 600,
            head_ratio_target: 0.62,
            remove_background: true,
        }
    }
}

/// Thresholds used by metric extraction and rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Required side length of the square photo, in pixels.
    pub size: u32,
    /// Lowest accepted head ratio (inclusive).
    pub head_ratio_min: f64,
    /// Highest accepted head ratio (inclusive).
    pub head_ratio_max: f64,
    /// Maximum nose offset from the centre line, as a fraction of width.
    pub centering_tolerance: f64,
    /// Minimum fraction of near-white border pixels.
    pub whiteness_threshold: f64,
    /// Lowest accepted mean luminance (0-255).
    pub luminance_min: f64,
    /// Highest accepted mean luminance (0-255).
    pub luminance_max: f64,
    /// Maximum fraction of pixels at or above `highlight_level`.
    pub max_highlight_clip: f64,
    /// Maximum luminance variance within the shadow band.
    pub max_shadow_variance: f64,
    /// Width of the sampled border band as a fraction of the short side.
    pub border_fraction: f64,
    /// Minimum channel value for a near-white pixel.
    pub near_white_level: u8,
    /// Maximum spread between channels for a near-white pixel.
    pub near_white_max_spread: u8,
    /// Luminance at which a pixel counts as a clipped highlight.
    pub highlight_level: u8,
    /// Luminance at or below which a pixel counts as a clipped shadow.
    pub shadow_level: u8,
    /// Upper percentile (0-1) of the luminance distribution treated as shadow.
    pub shadow_percentile: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            size: 600,
            head_ratio_min: HEAD_RATIO_BAND.0,
            head_ratio_max: HEAD_RATIO_BAND.1,
            centering_tolerance: 0.05,
            whiteness_threshold: 0.85,
            luminance_min: 60.0,
            luminance_max: 210.0,
            max_highlight_clip: 0.05,
            max_shadow_variance: 400.0,
            border_fraction: 0.05,
            near_white_level: 240,
            near_white_max_spread: 15,
            highlight_level: 250,
            shadow_level: 10,
            shadow_percentile: 0.10,
        }
    }
}

impl ValidationConfig {
    /// Default thresholds for photos produced with `params`.
    #[must_use]
    pub fn for_params(params: &ProcessingParams) -> Self {
        Self {
            size: params.size(),
            ..Self::default()
        }
    }

    /// Checks every field against its documented range.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(out_of_range("size", "at least 1", f64::from(self.size)));
        }
        check_open_unit("head_ratio_min", self.head_ratio_min)?;
        check_open_unit("head_ratio_max", self.head_ratio_max)?;
        check_ordered(
            ("head_ratio_min", self.head_ratio_min),
            ("head_ratio_max", self.head_ratio_max),
        )?;
        if !(0.0..=0.5).contains(&self.centering_tolerance) {
            return Err(out_of_range(
                "centering_tolerance",
                "within 0.0..=0.5",
                self.centering_tolerance,
            ));
        }
        check_unit("whiteness_threshold", self.whiteness_threshold)?;
        check_luminance("luminance_min", self.luminance_min)?;
        check_luminance("luminance_max", self.luminance_max)?;
        check_ordered(
            ("luminance_min", self.luminance_min),
            ("luminance_max", self.luminance_max),
        )?;
        check_unit("max_highlight_clip", self.max_highlight_clip)?;
        if !(self.max_shadow_variance >= 0.0 && self.max_shadow_variance.is_finite()) {
            return Err(out_of_range(
                "max_shadow_variance",
                "a finite value >= 0",
                self.max_shadow_variance,
            ));
        }
        if !(self.border_fraction > 0.0 && self.border_fraction <= 0.5) {
            return Err(out_of_range(
                "border_fraction",
                "within (0.0, 0.5]",
                self.border_fraction,
            ));
        }
        check_open_unit("shadow_percentile", self.shadow_percentile)?;
        Ok(())
    }
}

fn out_of_range(field: &'static str, expected: &'static str, value: f64) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        expected,
        value,
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, "within 0.0..=1.0", value))
    }
}

fn check_open_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(out_of_range(field, "within (0.0, 1.0]", value))
    }
}

fn check_luminance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=255.0).contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, "within 0.0..=255.0", value))
    }
}

fn check_ordered(
    (lower, lower_value): (&'static str, f64),
    (upper, upper_value): (&'static str, f64),
) -> Result<(), ConfigError> {
    if lower_value <= upper_value {
        Ok(())
    } else {
        Err(ConfigError::InvertedBounds {
            lower,
            lower_value,
            upper,
            upper_value,
        })
    }
}
