//! Error types for the validation engine.

use thiserror::Error;

/// Run-level failure of a validation.
///
/// Only image problems abort a run. Missing landmarks and rule anomalies are
/// absorbed into the report as skipped rules.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The image cannot be used for measurement.
    #[error("invalid image: {reason}")]
    InvalidImage {
        /// Why the image was rejected.
        reason: String,
    },

    /// The configuration failed range validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ValidationError {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }
}

/// A configuration value outside its accepted range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A field is outside its documented range.
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        /// Field name, e.g. `whiteness_threshold`.
        field: &'static str,
        /// Human-readable accepted range.
        expected: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Two bounds are in the wrong order.
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    InvertedBounds {
        /// Lower bound field name.
        lower: &'static str,
        /// Lower bound value.
        lower_value: f64,
        /// Upper bound field name.
        upper: &'static str,
        /// Upper bound value.
        upper_value: f64,
    },
}
