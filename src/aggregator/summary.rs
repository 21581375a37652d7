//! Group raw samples into per-(op, size, dtype) summaries.
//!
//! A single pass builds an explicit map from group key to the metric
//! values collected for that group, then each group is reduced to a
//! median and 95% interval per metric.

use super::stats::ci95;
use crate::parser::schema::{MetricSummary, RawSample, SummaryRow};
use crate::utils::config::NS_PER_SECOND;
use log::debug;
use std::collections::HashMap;

/// Metrics summarised for each group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Gflops,
    Gbps,
    /// Seconds per repetition
    Time,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Gflops, Metric::Gbps, Metric::Time];

    /// Short name used in file names and JSON keys
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Gflops => "gflops",
            Metric::Gbps => "gbps",
            Metric::Time => "t",
        }
    }

    /// Axis label for charts
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Gflops => "GFLOP/s (median, 95% CI)",
            Metric::Gbps => "GB/s (median, 95% CI)",
            Metric::Time => "Seconds per rep (median, 95% CI)",
        }
    }

    /// Value of this metric for one raw sample
    pub fn sample_value(&self, sample: &RawSample) -> f64 {
        match self {
            Metric::Gflops => sample.gflops,
            Metric::Gbps => sample.gbps,
            Metric::Time => sample.ns_per_rep / NS_PER_SECOND,
        }
    }

    /// Summary of this metric within a row
    pub fn of<'a>(&self, row: &'a SummaryRow) -> &'a MetricSummary {
        match self {
            Metric::Gflops => &row.gflops,
            Metric::Gbps => &row.gbps,
            Metric::Time => &row.t,
        }
    }
}

/// Composite grouping key
type GroupKey = (String, i64, String);

/// Values accumulated for one group
#[derive(Debug, Default)]
struct GroupValues {
    gflops: Vec<f64>,
    gbps: Vec<f64>,
    t: Vec<f64>,
}

impl GroupValues {
    fn push(&mut self, sample: &RawSample) {
        self.gflops.push(Metric::Gflops.sample_value(sample));
        self.gbps.push(Metric::Gbps.sample_value(sample));
        self.t.push(Metric::Time.sample_value(sample));
    }
}

/// Effective problem size of a sample
///
/// Non-positive sizes fall back to `M*N*K` when `M > 0`; otherwise the raw
/// value is kept and such samples share a group.
pub fn resolve_size(sample: &RawSample) -> i64 {
    if sample.size <= 0 && sample.m > 0 {
        sample.m.saturating_mul(sample.n).saturating_mul(sample.k)
    } else {
        sample.size
    }
}

/// Count samples that keep a non-positive size after resolution
pub fn count_unsized(samples: &[RawSample]) -> usize {
    samples.iter().filter(|s| resolve_size(s) <= 0).count()
}

/// Summarise samples into one row per `(op, size, dtype)`
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// Rows sorted by `(op, dtype, size)` ascending
pub fn summarize(samples: &[RawSample]) -> Vec<SummaryRow> {
    debug!("Summarizing {} samples", samples.len());

    let mut groups: HashMap<GroupKey, GroupValues> = HashMap::new();

    for sample in samples {
        let key = (sample.op.clone(), resolve_size(sample), sample.dtype.clone());
        groups.entry(key).or_default().push(sample);
    }

    let mut rows: Vec<SummaryRow> = groups
        .into_iter()
        .map(|((op, size, dtype), values)| SummaryRow {
            op,
            size,
            dtype,
            samples: values.t.len(),
            gflops: ci95(&values.gflops),
            gbps: ci95(&values.gbps),
            t: ci95(&values.t),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.op.cmp(&b.op)
            .then_with(|| a.dtype.cmp(&b.dtype))
            .then_with(|| a.size.cmp(&b.size))
    });

    debug!("Built {} summary rows", rows.len());

    rows
}
