//! Plain-text output adapter.

use anyhow::Result;
use passport_qa_core::{format_text, PhotoReport, ReportOutput};
use std::io::{self, Write};
use std::sync::Mutex;

/// Human-readable report per photo.
pub struct TextOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextOutput {
    /// Creates a text output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a text output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl ReportOutput for TextOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &PhotoReport) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(
            writer,
            "{} ({}x{})",
            report.path, report.dimensions.width, report.dimensions.height
        )?;
        writeln!(writer, "{}", format_text(&report.report))?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
