//! Table definitions for raw measurements and derived summaries.
//!
//! `RawSample` mirrors one CSV row written by the benchmark driver.
//! The remaining types are produced by the aggregator and the derived-metric
//! engine and are what the renderer and the JSON report consume.

use serde::{Deserialize, Deserializer, Serialize};

/// One measurement repetition as read from a benchmark CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Opaque timestamp (unix seconds in practice), passed through
    pub timestamp: String,

    /// Benchmarked operation name (e.g. "matmul_blocked")
    pub op: String,

    #[serde(rename = "M", deserialize_with = "empty_as_zero")]
    pub m: i64,

    #[serde(rename = "N", deserialize_with = "empty_as_zero")]
    pub n: i64,

    #[serde(rename = "K", deserialize_with = "empty_as_zero")]
    pub k: i64,

    /// Problem size; zero or negative means "derive from M*N*K"
    #[serde(deserialize_with = "empty_as_zero")]
    pub size: i64,

    /// Element type (e.g. "float", "f32")
    pub dtype: String,

    /// Repetitions timed by the driver
    pub reps: i64,

    /// Nanoseconds per repetition
    pub ns_per_rep: f64,

    /// Attained GFLOP/s
    pub gflops: f64,

    /// Attained GB/s
    pub gbps: f64,

    /// Result checksum, validated upstream and never read here
    pub checksum: String,
}

/// Empty integer cells (unused dimensions) read as 0
fn empty_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Median of one metric plus its asymmetric 95% interval
///
/// `lo` and `hi` are non-negative offsets from `median`, not absolute bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    pub median: f64,
    pub lo: f64,
    pub hi: f64,
}

impl MetricSummary {
    /// Absolute (lower, upper) bounds of the interval
    pub fn bounds(&self) -> (f64, f64) {
        (self.median - self.lo, self.median + self.hi)
    }
}

/// One aggregated `(op, size, dtype)` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub op: String,
    pub size: i64,
    pub dtype: String,

    /// Number of raw samples in the group
    pub samples: usize,

    pub gflops: MetricSummary,
    pub gbps: MetricSummary,

    /// Seconds per repetition
    pub t: MetricSummary,
}

impl SummaryRow {
    /// Treat this row as a single raw sample at its median values
    pub fn to_raw_sample(&self) -> RawSample {
        RawSample {
            timestamp: String::new(),
            op: self.op.clone(),
            m: 0,
            n: 0,
            k: 0,
            size: self.size,
            dtype: self.dtype.clone(),
            reps: 1,
            ns_per_rep: self.t.median * crate::utils::config::NS_PER_SECOND,
            gflops: self.gflops.median,
            gbps: self.gbps.median,
            checksum: String::new(),
        }
    }
}

/// Speedup of one operation over the baseline at a shared `(size, dtype)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeRow {
    pub op: String,
    pub dtype: String,
    pub size: i64,
    pub speedup: f64,
}

/// Roofline placement of one summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityPoint {
    pub op: String,
    pub dtype: String,
    pub size: i64,

    /// FLOPs per byte moved
    pub intensity: f64,

    /// Attained GFLOP/s
    pub gflops: f64,
}

/// Rows dropped by the derived-metric engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Non-baseline rows with no baseline row at the same `(size, dtype)`
    pub unmatched_speedup_rows: usize,

    /// Summary rows left out of the roofline (non-positive or non-finite bandwidth)
    pub excluded_roofline_rows: usize,
}

/// Top-level report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Baseline operation, if speedups were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,

    pub summary: Vec<SummaryRow>,

    #[serde(default)]
    pub speedups: Vec<ComparativeRow>,

    #[serde(default)]
    pub roofline: Vec<IntensityPoint>,

    #[serde(default)]
    pub diagnostics: Diagnostics,
}
