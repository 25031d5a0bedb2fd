//! Background whiteness and lighting rules.
//!
//! Lighting bounds are heuristics tuned for evenly lit head-and-shoulders
//! portraits on a light background.

use super::{finite, fraction, Outcome, RuleAnomaly};
use crate::config::ValidationConfig;
use crate::domain::MetricsBundle;

pub(super) fn background_whiteness(
    metrics: &MetricsBundle,
    config: &ValidationConfig,
) -> Result<Outcome, RuleAnomaly> {
    let whiteness = fraction("border_whiteness_pct", metrics.border_whiteness_pct)?;
    let threshold = config.whiteness_threshold;
    let passed = whiteness >= threshold;

    Ok(Outcome::evaluated(
        passed,
        format!(
            "near-white border pixels: {:.1}% (target ≥ {:.1}%)",
            whiteness * 100.0,
            threshold * 100.0
        ),
    )
    .with_metric("border_whiteness_pct", whiteness)
    .with_metric("threshold", threshold)
    .with_metric("band_px", f64::from(metrics.border_band_px)))
}

pub(super) fn lighting(
    metrics: &MetricsBundle,
    config: &ValidationConfig,
) -> Result<Outcome, RuleAnomaly> {
    let mean = finite("luminance_mean", metrics.luminance_mean)?;
    let clip = fraction("highlight_clip_pct", metrics.highlight_clip_pct)?;
    let shadow = finite("shadow_variance", metrics.shadow_variance)?;

    let mut violations = Vec::new();
    if !(config.luminance_min..=config.luminance_max).contains(&mean) {
        violations.push(format!(
            "mean luminance outside {:.0}–{:.0}",
            config.luminance_min, config.luminance_max
        ));
    }
    if clip > config.max_highlight_clip {
        violations.push(format!(
            "highlight clip above {:.1}%",
            config.max_highlight_clip * 100.0
        ));
    }
    if shadow > config.max_shadow_variance {
        violations.push(format!(
            "shadow variance above {:.1}",
            config.max_shadow_variance
        ));
    }

    let mut detail = format!(
        "mean luminance {mean:.0}, highlight clip {:.1}%, shadow variance {shadow:.1}",
        clip * 100.0
    );
    if !violations.is_empty() {
        detail.push_str("; ");
        detail.push_str(&violations.join("; "));
    }

    Ok(Outcome::evaluated(violations.is_empty(), detail)
        .with_metric("luminance_mean", mean)
        .with_metric("luminance_std", metrics.luminance_std)
        .with_metric("highlight_clip_pct", clip)
        .with_metric("shadow_clip_pct", metrics.shadow_clip_pct)
        .with_metric("shadow_variance", shadow))
}
