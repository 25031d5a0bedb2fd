//! Validation engine: extraction, rule evaluation and report building.
//!
//! The engine is a pure function of its inputs. It holds only an immutable
//! configuration, so one instance can be shared across threads.

use image::RgbImage;
use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::domain::{
    FacialLandmarks, ImageInfo, MetricsBundle, PhotoReport, ReportBuilder, ValidationReport,
};
use crate::error::{ConfigError, ValidationError};
use crate::extract::extract;
use crate::ports::LandmarkDetector;
use crate::rules::evaluate_all;

/// Metrics and report from one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Measured quantities.
    pub metrics: MetricsBundle,
    /// Rule outcomes.
    pub report: ValidationReport,
}

impl Validation {
    /// Wraps the run in a per-photo envelope.
    #[must_use]
    pub fn into_photo_report(self, image: &ImageInfo, include_metrics: bool) -> PhotoReport {
        PhotoReport {
            path: image.path.clone(),
            dimensions: image.dimensions(),
            report: self.report,
            metrics: include_metrics.then_some(self.metrics),
        }
    }
}

/// Validates processed photos against a fixed configuration.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Creates an engine after range-checking `config`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration field outside its range.
    pub fn new(config: ValidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Measures a photo.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidImage`] for an unusable image.
    pub fn extract(
        &self,
        image: &RgbImage,
        landmarks: Option<&FacialLandmarks>,
    ) -> Result<MetricsBundle, ValidationError> {
        extract(image, landmarks, &self.config)
    }

    /// Validates a photo and returns its metrics together with the report.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidImage`] for an unusable image; no
    /// partial report is produced.
    pub fn run(
        &self,
        image: &RgbImage,
        landmarks: Option<&FacialLandmarks>,
    ) -> Result<Validation, ValidationError> {
        let metrics = self.extract(image, landmarks)?;
        let report = ReportBuilder::build(evaluate_all(&metrics, &self.config));
        debug!(
            overall_pass = report.overall_pass(),
            "validation finished"
        );
        Ok(Validation { metrics, report })
    }

    /// Validates a photo.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidImage`] for an unusable image.
    pub fn validate(
        &self,
        image: &RgbImage,
        landmarks: Option<&FacialLandmarks>,
    ) -> Result<ValidationReport, ValidationError> {
        self.run(image, landmarks).map(|v| v.report)
    }

    /// Detects landmarks with `detector`, then validates.
    ///
    /// A detector failure is not an error: geometry rules are skipped and
    /// photometric rules still run.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidImage`] for an unusable image.
    pub fn check_photo(
        &self,
        image: &ImageInfo,
        detector: &dyn LandmarkDetector,
    ) -> Result<Validation, ValidationError> {
        let landmarks = match detector.detect(image) {
            Ok(landmarks) => Some(landmarks),
            Err(e) => {
                info!(
                    path = %image.path,
                    detector = detector.name(),
                    "{e}; geometry rules will be skipped"
                );
                None
            }
        };
        self.run(&image.to_rgb8(), landmarks.as_ref())
    }
}

/// Validates a photo with an explicit configuration.
///
/// # Errors
///
/// Returns [`ValidationError::Config`] for an out-of-range configuration and
/// [`ValidationError::InvalidImage`] for an unusable image.
pub fn validate(
    image: &RgbImage,
    landmarks: Option<&FacialLandmarks>,
    config: &ValidationConfig,
) -> Result<ValidationReport, ValidationError> {
    config.validate()?;
    let metrics = extract(image, landmarks, config)?;
    Ok(ReportBuilder::build(evaluate_all(&metrics, config)))
}
