//! Compliance rules.
//!
//! The rule set is closed: [`Rule::ALL`] fixes both membership and report
//! order. Each rule is a pure function of a [`MetricsBundle`] and a
//! [`ValidationConfig`] and always yields a [`RuleResult`].

mod geometry;
mod photometric;

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use tracing::warn;

use crate::config::ValidationConfig;
use crate::domain::{MetricsBundle, RuleResult, RuleStatus};

/// A compliance rule with a stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Photo has the configured square pixel size.
    Size,
    /// Head spans an accepted fraction of the photo height.
    HeadRatio,
    /// Nose is close to the vertical centre line.
    Centering,
    /// Border band is predominantly near-white.
    BackgroundWhiteness,
    /// Exposure is even and within bounds.
    Lighting,
}

impl Rule {
    /// Every rule, in registration (and report) order.
    pub const ALL: [Self; 5] = [
        Self::Size,
        Self::HeadRatio,
        Self::Centering,
        Self::BackgroundWhiteness,
        Self::Lighting,
    ];

    /// Stable identifier used in reports.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::HeadRatio => "head_ratio",
            Self::Centering => "centering",
            Self::BackgroundWhiteness => "background_whiteness",
            Self::Lighting => "lighting",
        }
    }

    /// Advice attached to a failed result.
    #[must_use]
    pub const fn suggestion(self) -> &'static str {
        match self {
            Self::Size => "Export the photo at the required pixel dimensions.",
            Self::HeadRatio => {
                "Adjust your distance to the camera so the head fills the frame appropriately."
            }
            Self::Centering => {
                "Re-center your face so the nose sits near the middle of the frame."
            }
            Self::BackgroundWhiteness => {
                "Stand in front of a plain, light-colored background or enable background removal."
            }
            Self::Lighting => {
                "Use even front lighting: move near a window and avoid backlight and harsh shadows."
            }
        }
    }

    /// Looks up a rule by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.id() == id)
    }

    /// Evaluates this rule. Never fails: anomalies become skipped results.
    #[must_use]
    pub fn evaluate(self, metrics: &MetricsBundle, config: &ValidationConfig) -> RuleResult {
        let outcome = match self {
            Self::Size => Ok(geometry::size(metrics, config)),
            Self::HeadRatio => geometry::head_ratio(metrics, config),
            Self::Centering => geometry::centering(metrics, config),
            Self::BackgroundWhiteness => photometric::background_whiteness(metrics, config),
            Self::Lighting => photometric::lighting(metrics, config),
        };

        let outcome = outcome.unwrap_or_else(|anomaly| {
            warn!(rule = self.id(), %anomaly, "rule skipped after anomaly");
            Outcome::skipped(format!("rule could not be evaluated: {anomaly}"))
        });

        RuleResult {
            rule_name: self.id().to_string(),
            passed: outcome.status,
            detail: outcome.detail,
            suggestion: (outcome.status == RuleStatus::Fail)
                .then(|| self.suggestion().to_string()),
            metrics: outcome.metrics,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Evaluates every registered rule in order.
#[must_use]
pub fn evaluate_all(metrics: &MetricsBundle, config: &ValidationConfig) -> Vec<RuleResult> {
    Rule::ALL
        .into_iter()
        .map(|rule| rule.evaluate(metrics, config))
        .collect()
}

/// A metric value a rule cannot reason about.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleAnomaly {
    /// The value is NaN or infinite.
    #[error("{metric} is not a finite number ({value})")]
    NonFinite {
        /// Metric name.
        metric: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The value is finite but outside its possible range.
    #[error("{metric} = {value} is outside {expected}")]
    OutOfDomain {
        /// Metric name.
        metric: &'static str,
        /// Offending value.
        value: f64,
        /// Possible range.
        expected: &'static str,
    },
}

/// Status, detail and metrics of one evaluation, before naming.
#[derive(Debug)]
struct Outcome {
    status: RuleStatus,
    detail: String,
    metrics: BTreeMap<String, f64>,
}

impl Outcome {
    fn evaluated(passed: bool, detail: String) -> Self {
        Self {
            status: RuleStatus::from(passed),
            detail,
            metrics: BTreeMap::new(),
        }
    }

    fn skipped(detail: String) -> Self {
        Self {
            status: RuleStatus::Skipped,
            detail,
            metrics: BTreeMap::new(),
        }
    }

    fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }
}

fn finite(metric: &'static str, value: f64) -> Result<f64, RuleAnomaly> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuleAnomaly::NonFinite { metric, value })
    }
}

fn fraction(metric: &'static str, value: f64) -> Result<f64, RuleAnomaly> {
    let value = finite(metric, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(RuleAnomaly::OutOfDomain {
            metric,
            value,
            expected: "0.0..=1.0",
        })
    }
}
