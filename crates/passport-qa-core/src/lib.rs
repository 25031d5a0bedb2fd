//! Passport QA Core - Validation engine for passport photo compliance
//!
//! This crate contains the domain types, the configuration model, metric
//! extraction, the compliance rule set and report building. It performs no
//! I/O: callers decode images and obtain landmarks, then hand both in.
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use passport_qa_core::{ValidationConfig, ValidationEngine};
//!
//! let engine = ValidationEngine::new(ValidationConfig::default())?;
//! let photo = RgbImage::from_pixel(600, 600, Rgb([245, 245, 245]));
//! let report = engine.validate(&photo, None)?;
//!
//! assert_eq!(report.results().len(), 5);
//! assert!(report.result("head_ratio").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod extract;
pub mod ports;
pub mod rules;

pub use config::{ProcessingParams, ValidationConfig};
pub use domain::{
    format_text, FacialLandmarks, ImageDimensions, ImageInfo, Measurement, MetricsBundle,
    PhotoReport, Point, ReportBuilder, ReportSummary, RuleResult, RuleStatus, Unavailable,
    ValidationReport,
};
pub use engine::{validate, Validation, ValidationEngine};
pub use error::{ConfigError, ValidationError};
pub use extract::extract;
pub use ports::{
    ImageSource, LandmarkDetector, NoFaceDetected, ProgressEvent, ProgressSink, ReportOutput,
    UnreadableImage,
};
pub use rules::{evaluate_all, Rule, RuleAnomaly};
