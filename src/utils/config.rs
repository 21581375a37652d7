//! Configuration and constants for the CLI.

/// Current summary report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Columns every benchmark CSV source must carry (order-independent)
pub const REQUIRED_COLUMNS: &[&str] = &[
    "timestamp",
    "op",
    "M",
    "N",
    "K",
    "size",
    "dtype",
    "reps",
    "ns_per_rep",
    "gflops",
    "gbps",
    "checksum",
];

// ns_per_rep is reported in nanoseconds, summaries use seconds
pub const NS_PER_SECOND: f64 = 1e9;

// Bounds of the empirical 95% confidence interval
pub const CI_LOWER_QUANTILE: f64 = 0.025;
pub const CI_UPPER_QUANTILE: f64 = 0.975;

/// Intensity range (FLOP/byte) covered by the roofline reference curve
pub const ROOFLINE_INTENSITY_RANGE: (f64, f64) = (1e-3, 1e3);

/// Number of log-spaced points in the roofline reference curve
pub const ROOFLINE_SWEEP_POINTS: usize = 512;

// 7 x 4.5 inches at 150 dpi
pub const DEFAULT_CHART_WIDTH: u32 = 1050;
pub const DEFAULT_CHART_HEIGHT: u32 = 675;

/// Default output directory for charts
pub const DEFAULT_OUTDIR: &str = "plots";
