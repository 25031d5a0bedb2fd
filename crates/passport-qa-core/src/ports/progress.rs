//! Progress reporting port for CLI and UI integration.

use crate::domain::PhotoReport;

/// Events emitted during a batch validation.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Validation started for a photo.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Validation completed for a photo.
    Completed {
        /// The photo report.
        report: Box<PhotoReport>,
    },
    /// A photo was skipped because it could not be loaded or measured.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All photos have been processed.
    Finished {
        /// Photos validated.
        processed: usize,
        /// Photos that failed at least one rule.
        non_compliant: usize,
        /// Photos skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
