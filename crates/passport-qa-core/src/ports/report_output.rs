//! Report output port for writing validation results.

use crate::domain::PhotoReport;

/// Port for outputting photo reports.
pub trait ReportOutput: Send + Sync {
    /// Writes a single photo report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &PhotoReport) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
