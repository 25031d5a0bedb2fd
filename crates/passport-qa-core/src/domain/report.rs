//! Validation report and its builder.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{RuleResult, RuleStatus};

/// Ordered rule outcomes for one photo.
///
/// The report is immutable: run validation again to get a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(rename = "rules")]
    results: Vec<RuleResult>,
    overall_pass: bool,
    #[serde(with = "time::serde::rfc3339")]
    generated_at: OffsetDateTime,
}

impl ValidationReport {
    /// Rule results in registration order.
    #[must_use]
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    /// True iff every evaluated rule passed and at least one was evaluated.
    #[must_use]
    pub const fn overall_pass(&self) -> bool {
        self.overall_pass
    }

    /// When the report was built (UTC).
    #[must_use]
    pub const fn generated_at(&self) -> OffsetDateTime {
        self.generated_at
    }

    /// Looks up a result by rule name.
    #[must_use]
    pub fn result(&self, rule_name: &str) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule_name == rule_name)
    }

    /// Counts results by status.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        self.results
            .iter()
            .fold(ReportSummary::default(), |mut acc, r| {
                match r.passed {
                    RuleStatus::Pass => acc.passed += 1,
                    RuleStatus::Fail => acc.failed += 1,
                    RuleStatus::Skipped => acc.skipped += 1,
                }
                acc
            })
    }
}

/// Per-status result counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Rules that passed.
    pub passed: usize,
    /// Rules that failed.
    pub failed: usize,
    /// Rules that were skipped.
    pub skipped: usize,
}

/// Aggregates rule results into a [`ValidationReport`].
pub struct ReportBuilder;

impl ReportBuilder {
    /// Builds a report stamped with the current UTC time.
    #[must_use]
    pub fn build(results: Vec<RuleResult>) -> ValidationReport {
        Self::build_at(results, OffsetDateTime::now_utc())
    }

    /// Builds a report with an explicit timestamp.
    #[must_use]
    pub fn build_at(results: Vec<RuleResult>, generated_at: OffsetDateTime) -> ValidationReport {
        let overall_pass = overall_pass(&results);
        ValidationReport {
            results,
            overall_pass,
            generated_at,
        }
    }
}

/// An all-skipped (or empty) result list never passes.
fn overall_pass(results: &[RuleResult]) -> bool {
    let mut evaluated = results.iter().filter(|r| r.passed.is_evaluated()).peekable();
    evaluated.peek().is_some() && evaluated.all(RuleResult::is_pass)
}

/// Renders a report as plain text, one line per rule.
#[must_use]
pub fn format_text(report: &ValidationReport) -> String {
    let title = "Passport Photo Validation Report";
    let verdict = if report.overall_pass() { "PASS" } else { "FAIL" };
    let mut lines = vec![
        title.to_string(),
        "-".repeat(title.len()),
        format!("Overall: {verdict}"),
        String::new(),
    ];

    for result in report.results() {
        lines.push(format!(
            "[{}] {}: {}",
            result.passed.label(),
            result.rule_name,
            result.detail
        ));
        if let Some(suggestion) = &result.suggestion {
            lines.push(format!("       → {suggestion}"));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
