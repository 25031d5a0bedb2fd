//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the validation engine and
//! external adapters.

mod image_source;
mod landmarks;
mod progress;
mod report_output;

pub use image_source::{ImageSource, UnreadableImage};
pub use landmarks::{LandmarkDetector, NoFaceDetected};
pub use progress::{ProgressEvent, ProgressSink};
pub use report_output::ReportOutput;
