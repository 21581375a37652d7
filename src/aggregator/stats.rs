//! Order statistics over a group of metric values.
//!
//! Percentiles use linear interpolation between closest ranks, the same
//! convention as numpy's default `quantile`.

use crate::parser::schema::MetricSummary;
use crate::utils::config::{CI_LOWER_QUANTILE, CI_UPPER_QUANTILE};

/// Sorted copy of `values`
fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile `q` in [0, 1] of already-sorted values
///
/// Returns 0.0 for an empty slice.
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
    }
}

/// Percentile `q` in [0, 1] of `values` (any order)
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted(values), q)
}

/// Median of `values`; mean of the two middle values for even counts
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 0.5)
}

/// Median plus the empirical 95% interval as offsets from the median
///
/// Groups with fewer than two values get a zero-width interval.
pub fn ci95(values: &[f64]) -> MetricSummary {
    let sorted = sorted(values);
    let median = percentile_sorted(&sorted, 0.5);

    if sorted.len() < 2 {
        return MetricSummary {
            median,
            lo: 0.0,
            hi: 0.0,
        };
    }

    let lower = percentile_sorted(&sorted, CI_LOWER_QUANTILE);
    let upper = percentile_sorted(&sorted, CI_UPPER_QUANTILE);

    MetricSummary {
        median,
        lo: (median - lower).max(0.0),
        hi: (upper - median).max(0.0),
    }
}
