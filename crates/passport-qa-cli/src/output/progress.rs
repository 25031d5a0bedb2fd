//! Progress reporting on stderr using indicatif.

use std::path::Path;

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use passport_qa_core::{PhotoReport, ProgressEvent, ProgressSink, RuleStatus};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Progress sink for the check command.
///
/// Draws a bar when requested; otherwise prints one line per non-compliant
/// or skipped photo. Prints nothing when quiet.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
    quiet: bool,
}

impl ProgressBar {
    /// Creates a progress sink.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of photos, if known
    /// * `quiet` - Suppress all output
    /// * `show_bar` - Draw a bar instead of per-photo lines
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        let bar = (!quiet && show_bar).then(|| {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self { bar, quiet }
    }

    fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

/// One-line verdict for a non-compliant photo.
fn failure_line(report: &PhotoReport) -> String {
    let failed: Vec<&str> = report
        .report
        .results()
        .iter()
        .filter(|r| r.passed == RuleStatus::Fail)
        .map(|r| r.rule_name.as_str())
        .collect();
    format!("{}: FAIL ({})", report.path, failed.join(", "))
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::Started { path, index, total } => {
                if let Some(bar) = &self.bar {
                    if let Some(t) = total {
                        bar.set_length(t as u64);
                    }
                    bar.set_position(index as u64);
                    bar.set_message(file_name(&path));
                }
            }
            ProgressEvent::Completed { report } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
                if !report.report.overall_pass() {
                    self.println(&failure_line(&report));
                }
            }
            ProgressEvent::Skipped { path, reason } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                }
                self.println(&format!("WARN: Skipping {path}: {reason}"));
            }
            ProgressEvent::Finished {
                processed,
                non_compliant,
                skipped,
            } => {
                if let Some(bar) = &self.bar {
                    bar.finish_with_message(format!(
                        "Done: {processed} checked, {non_compliant} non-compliant, {skipped} skipped"
                    ));
                }
            }
        }
    }
}
