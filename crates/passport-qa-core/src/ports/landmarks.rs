//! Landmark oracle port.

use thiserror::Error;

use crate::domain::{FacialLandmarks, ImageInfo};

/// The detector found no usable face.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no face detected: {reason}")]
pub struct NoFaceDetected {
    /// Detector-specific explanation.
    pub reason: String,
}

impl NoFaceDetected {
    /// Creates the condition with an explanation.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Port for an external facial landmark detector.
///
/// Implementations either return a complete landmark set or fail with
/// [`NoFaceDetected`]; they never return partial points.
pub trait LandmarkDetector: Send + Sync {
    /// Returns the name of this detector, for logs.
    fn name(&self) -> &'static str;

    /// Detects facial landmarks in a processed photo.
    ///
    /// # Errors
    ///
    /// Returns [`NoFaceDetected`] if no face could be located.
    fn detect(&self, image: &ImageInfo) -> Result<FacialLandmarks, NoFaceDetected>;
}
