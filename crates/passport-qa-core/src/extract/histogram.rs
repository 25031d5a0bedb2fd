//! 256-bin luminance histogram.

/// Counts of rounded luma values, one bin per 8-bit level.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Builds a histogram from 8-bit luma bins.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = u8>) -> Self {
        let mut bins = [0u64; 256];
        values
            .into_iter()
            .for_each(|v| bins[usize::from(v)] += 1);
        Self {
            total: bins.iter().sum(),
            bins,
        }
    }

    /// Number of samples.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Lowest bin whose cumulative count reaches fraction `p` of the samples.
    ///
    /// `p` is clamped to 0..=1; an empty histogram yields 0.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn percentile(&self, p: f64) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let target = (self.total as f64 * p.clamp(0.0, 1.0)).round() as u64;
        self.bins
            .iter()
            .scan(0u64, |cumulative, &count| {
                *cumulative += count;
                Some(*cumulative)
            })
            .position(|cumulative| cumulative >= target)
            .map_or(u8::MAX, |bin| u8::try_from(bin).unwrap_or(u8::MAX))
    }

    /// Samples at or below `level`.
    #[must_use]
    pub fn count_at_or_below(&self, level: u8) -> u64 {
        self.bins[..=usize::from(level)].iter().sum()
    }

    /// Samples at or above `level`.
    #[must_use]
    pub fn count_at_or_above(&self, level: u8) -> u64 {
        self.bins[usize::from(level)..].iter().sum()
    }

    /// Fraction of samples at or below `level`.
    #[must_use]
    pub fn fraction_at_or_below(&self, level: u8) -> f64 {
        self.share(self.count_at_or_below(level))
    }

    /// Fraction of samples at or above `level`.
    #[must_use]
    pub fn fraction_at_or_above(&self, level: u8) -> f64 {
        self.share(self.count_at_or_above(level))
    }

    #[allow(clippy::cast_precision_loss)]
    fn share(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation)]
mod tests {
    use super::*;

    fn ramp(repeat: usize) -> Histogram {
        Histogram::from_values((0..=255u8).flat_map(|v| std::iter::repeat(v).take(repeat)))
    }

    #[test]
    fn test_uniform_ramp_bins() {
        let hist = ramp(1);
        assert_eq!(hist.total(), 256);
        assert!(hist.bins.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_percentiles() {
        let hist = ramp(100);

        let p50 = hist.percentile(0.5);
        assert!(p50 > 120 && p50 < 136, "p50 should be ~128, got {p50}");

        let p10 = hist.percentile(0.10);
        assert!((20..=30).contains(&p10), "p10 should be ~25, got {p10}");
    }

    #[test]
    fn test_percentile_edge_cases() {
        let hist = ramp(1);
        assert_eq!(hist.percentile(0.0), 0, "p0 should be 0");
        assert_eq!(hist.percentile(1.0), 255, "p100 should be 255");
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::from_values(std::iter::empty());

        assert_eq!(hist.percentile(0.5), 0);
        assert!(hist.fraction_at_or_below(128).abs() < f64::EPSILON);
        assert!(hist.fraction_at_or_above(128).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clip_fractions_are_inclusive() {
        let hist = Histogram::from_values([10u8, 10, 245, 245]);
        assert!((hist.fraction_at_or_below(10) - 0.5).abs() < f64::EPSILON);
        assert!((hist.fraction_at_or_above(245) - 0.5).abs() < f64::EPSILON);
        assert!(hist.fraction_at_or_below(9).abs() < f64::EPSILON);
        assert!(hist.fraction_at_or_above(246).abs() < f64::EPSILON);
    }
}
