//! Per-station running summary: min, max, total, count.
//!
//! The mean is never stored. It is derived from `total` and `count` at
//! report time, so folding order cannot smuggle rounding error into the
//! result.

use crate::parser::Measurement;
use crate::utils::config::UNITS_PER_TENTH;

/// Running statistics for one station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    min: Measurement,
    max: Measurement,
    total: i128,
    count: u64,
}

impl Summary {
    /// Start a summary from the first observation for a station
    ///
    /// Seeding min and max from a real value avoids sentinel extremes
    /// that would leak into reports for single-record stations.
    pub fn new(first: Measurement) -> Self {
        Self {
            min: first,
            max: first,
            total: first.scaled() as i128,
            count: 1,
        }
    }

    /// Fold one more observation into the summary
    pub fn observe(&mut self, value: Measurement) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.total += value.scaled() as i128;
        self.count += 1;
    }

    /// Combine two summaries for the same station
    ///
    /// **Public** - used when merging shard tables after a parallel run
    ///
    /// Associative and commutative, so the merge order of shards cannot
    /// change any reported number.
    pub fn merge(&mut self, other: &Summary) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.total += other.total;
        self.count += other.count;
    }

    /// Smallest observed measurement
    pub fn min(&self) -> Measurement {
        self.min
    }

    /// Largest observed measurement
    pub fn max(&self) -> Measurement {
        self.max
    }

    /// Number of observations folded in
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean rounded to one fractional digit
    ///
    /// Computed as total/count in integer arithmetic, rounding half away
    /// from zero on the final tenths digit.
    pub fn mean(&self) -> Measurement {
        Measurement::from_tenths(self.mean_tenths())
    }

    /// **Private** - mean in tenths, the unit the report prints
    fn mean_tenths(&self) -> i64 {
        let divisor = self.count as i128 * UNITS_PER_TENTH as i128;
        div_round_half_away(self.total, divisor) as i64
    }
}

/// Integer division rounding half away from zero; `d` must be positive
fn div_round_half_away(n: i128, d: i128) -> i128 {
    let quotient = n / d;
    let remainder = n % d;
    if remainder.abs() * 2 >= d {
        quotient + remainder.signum()
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(text: &str) -> Measurement {
        Measurement::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_single_observation() {
        let summary = Summary::new(m("10.0"));
        assert_eq!(summary.min(), m("10.0"));
        assert_eq!(summary.max(), m("10.0"));
        assert_eq!(summary.mean(), m("10.0"));
        assert_eq!(summary.count(), 1);
    }

    #[test]
    fn test_observe_updates_extremes() {
        let mut summary = Summary::new(m("10.0"));
        summary.observe(m("-5.0"));
        summary.observe(m("30.0"));
        assert_eq!(summary.min(), m("-5.0"));
        assert_eq!(summary.max(), m("30.0"));
        assert_eq!(summary.count(), 3);
    }

    #[test]
    fn test_mean_is_exact_for_integral_results() {
        let mut summary = Summary::new(m("1.0"));
        summary.observe(m("2.0"));
        summary.observe(m("3.0"));
        assert_eq!(summary.mean(), m("2.0"));
    }

    #[test]
    fn test_mean_rounds_half_away_from_zero() {
        // (1.0 + 1.5) / 2 = 1.25 -> 1.3
        let mut summary = Summary::new(m("1.0"));
        summary.observe(m("1.5"));
        assert_eq!(summary.mean(), m("1.3"));

        // (-1.0 + -1.5) / 2 = -1.25 -> -1.3
        let mut summary = Summary::new(m("-1.0"));
        summary.observe(m("-1.5"));
        assert_eq!(summary.mean(), m("-1.3"));
    }

    #[test]
    fn test_mean_truncates_below_half() {
        // (1.0 + 1.2 + 1.2) / 3 = 1.133.. -> 1.1
        let mut summary = Summary::new(m("1.0"));
        summary.observe(m("1.2"));
        summary.observe(m("1.2"));
        assert_eq!(summary.mean(), m("1.1"));

        // (-1.0 + -1.2 + -1.2) / 3 = -1.133.. -> -1.1
        let mut summary = Summary::new(m("-1.0"));
        summary.observe(m("-1.2"));
        summary.observe(m("-1.2"));
        assert_eq!(summary.mean(), m("-1.1"));

        // (1.0 + 1.6 + 1.6) / 3 = 1.4 exactly
        let mut summary = Summary::new(m("1.0"));
        summary.observe(m("1.6"));
        summary.observe(m("1.6"));
        assert_eq!(summary.mean(), m("1.4"));
    }

    #[test]
    fn test_mean_does_not_drift_with_order() {
        // Folding many identical values keeps the mean pinned
        let mut summary = Summary::new(m("25.2"));
        for _ in 0..9999 {
            summary.observe(m("25.2"));
        }
        assert_eq!(summary.mean(), m("25.2"));
        assert_eq!(summary.count(), 10_000);
    }

    #[test]
    fn test_merge_matches_sequential_fold() {
        let values = ["1.0", "-2.5", "3.7", "0.0", "99.9", "-99.9", "12.1"];

        let mut sequential = Summary::new(m(values[0]));
        for v in &values[1..] {
            sequential.observe(m(v));
        }

        let mut left = Summary::new(m(values[0]));
        for v in &values[1..4] {
            left.observe(m(v));
        }
        let mut right = Summary::new(m(values[4]));
        for v in &values[5..] {
            right.observe(m(v));
        }
        left.merge(&right);

        assert_eq!(left, sequential);
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut a = Summary::new(m("1.0"));
        a.observe(m("2.0"));
        let mut b = Summary::new(m("-4.0"));
        b.observe(m("10.0"));

        let mut ab = a;
        ab.merge(&b);
        let mut ba = b;
        ba.merge(&a);

        assert_eq!(ab, ba);
    }

    #[test]
    fn test_div_round_half_away() {
        assert_eq!(div_round_half_away(25, 10), 3);
        assert_eq!(div_round_half_away(24, 10), 2);
        assert_eq!(div_round_half_away(-25, 10), -3);
        assert_eq!(div_round_half_away(-24, 10), -2);
        assert_eq!(div_round_half_away(0, 10), 0);
    }
}
