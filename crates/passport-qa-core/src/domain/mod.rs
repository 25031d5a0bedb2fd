//! Core domain types for passport photo validation.

mod landmarks;
mod metrics;
mod report;
mod result;
mod rule_result;

pub use landmarks::{FacialLandmarks, Point};
pub use metrics::{Measurement, MetricsBundle, Unavailable};
pub use report::{format_text, ReportBuilder, ReportSummary, ValidationReport};
pub use result::{ImageDimensions, ImageInfo, PhotoReport};
pub use rule_result::{RuleResult, RuleStatus};
