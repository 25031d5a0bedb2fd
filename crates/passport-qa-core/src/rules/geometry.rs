//! Size, head ratio and centering rules.

use super::{finite, Outcome, RuleAnomaly};
use crate::config::ValidationConfig;
use crate::domain::{Measurement, MetricsBundle};

pub(super) fn size(metrics: &MetricsBundle, config: &ValidationConfig) -> Outcome {
    let (w, h) = (metrics.image_width, metrics.image_height);
    let expected = config.size;
    let passed = w == expected && h == expected;

    Outcome::evaluated(passed, format!("expected {expected}×{expected}, got {w}×{h}"))
        .with_metric("width", f64::from(w))
        .with_metric("height", f64::from(h))
        .with_metric("expected", f64::from(expected))
}

pub(super) fn head_ratio(
    metrics: &MetricsBundle,
    config: &ValidationConfig,
) -> Result<Outcome, RuleAnomaly> {
    let ratio = match metrics.head_ratio {
        Measurement::Available { value } => finite("head_ratio", value)?,
        Measurement::Unavailable { reason } => {
            return Ok(Outcome::skipped(format!(
                "face landmarks unavailable: {reason}"
            )))
        }
    };

    let (lo, hi) = (config.head_ratio_min, config.head_ratio_max);
    let passed = (lo..=hi).contains(&ratio);

    Ok(Outcome::evaluated(
        passed,
        format!("{ratio:.2} of image height (target {lo:.2}–{hi:.2})"),
    )
    .with_metric("head_ratio", ratio)
    .with_metric("min", lo)
    .with_metric("max", hi))
}

pub(super) fn centering(
    metrics: &MetricsBundle,
    config: &ValidationConfig,
) -> Result<Outcome, RuleAnomaly> {
    let offset = match metrics.nose_offset_fraction {
        Measurement::Available { value } => finite("nose_offset_fraction", value)?,
        Measurement::Unavailable { reason } => {
            return Ok(Outcome::skipped(format!(
                "face landmarks unavailable: {reason}"
            )))
        }
    };

    let tolerance = config.centering_tolerance;
    let passed = offset <= tolerance;

    Ok(Outcome::evaluated(
        passed,
        format!("nose offset {offset:.3} of image width (tolerance {tolerance:.3})"),
    )
    .with_metric("nose_offset_fraction", offset)
    .with_metric("tolerance", tolerance))
}
