//! Outcome of a single compliance rule.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tri-state rule outcome.
///
/// Serialized as the JSON value of `passed`: `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Option<bool>", from = "Option<bool>")]
pub enum RuleStatus {
    /// The rule was evaluated and passed.
    Pass,
    /// The rule was evaluated and failed.
    Fail,
    /// The rule could not be evaluated.
    Skipped,
}

impl RuleStatus {
    /// Whether the rule was actually evaluated.
    #[must_use]
    pub const fn is_evaluated(self) -> bool {
        !matches!(self, Self::Skipped)
    }

    /// Short uppercase label used in text reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

impl From<bool> for RuleStatus {
    fn from(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

impl From<RuleStatus> for Option<bool> {
    fn from(status: RuleStatus) -> Self {
        match status {
            RuleStatus::Pass => Some(true),
            RuleStatus::Fail => Some(false),
            RuleStatus::Skipped => None,
        }
    }
}

impl From<Option<bool>> for RuleStatus {
    fn from(passed: Option<bool>) -> Self {
        passed.map_or(Self::Skipped, Self::from)
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of evaluating one rule against a metrics bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Stable rule identifier.
    #[serde(rename = "name")]
    pub rule_name: String,
    /// Outcome.
    pub passed: RuleStatus,
    /// Human-readable justification.
    pub detail: String,
    /// Actionable advice, present only for failed rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Values the rule looked at, keyed by metric name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, f64>,
}

impl RuleResult {
    /// Whether this result counts as a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.passed == RuleStatus::Pass
    }
}
