//! Measured quantities derived from a processed photo.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a measurement could not be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    /// The landmark detector found no face.
    NoFaceDetected,
    /// The landmarks put the chin at or above the forehead.
    InconsistentLandmarks,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFaceDetected => f.write_str("no face detected"),
            Self::InconsistentLandmarks => f.write_str("landmarks are inconsistent"),
        }
    }
}

/// A metric that depends on optional input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Measurement {
    /// The metric was measured.
    Available {
        /// Measured value.
        value: f64,
    },
    /// The metric could not be measured.
    Unavailable {
        /// Missing input.
        reason: Unavailable,
    },
}

impl Measurement {
    /// Wraps a measured value.
    #[must_use]
    pub const fn available(value: f64) -> Self {
        Self::Available { value }
    }

    /// Marks a metric as unavailable.
    #[must_use]
    pub const fn unavailable(reason: Unavailable) -> Self {
        Self::Unavailable { reason }
    }

    /// Returns the measured value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Available { value } => Some(*value),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Snapshot of every quantity the rules look at.
///
/// All fields are always populated. Geometry that needs landmarks carries an
/// explicit [`Measurement::Unavailable`] instead of a placeholder number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
    /// Forehead-to-chin span over image height.
    pub head_ratio: Measurement,
    /// Horizontal nose offset from the centre line over image width.
    pub nose_offset_fraction: Measurement,
    /// Fraction (0-1) of border band pixels classified near-white.
    pub border_whiteness_pct: f64,
    /// Width of the sampled border band in pixels.
    pub border_band_px: u32,
    /// Mean luminance (0-255).
    pub luminance_mean: f64,
    /// Standard deviation of luminance.
    pub luminance_std: f64,
    /// Fraction (0-1) of pixels at or above the highlight level.
    pub highlight_clip_pct: f64,
    /// Fraction (0-1) of pixels at or below the shadow level.
    pub shadow_clip_pct: f64,
    /// Luminance variance within the shadow percentile band.
    pub shadow_variance: f64,
}
