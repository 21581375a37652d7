//! Aggregation of raw samples into summary rows.
//!
//! This module transforms loaded measurements into:
//! - Size-resolved `(op, size, dtype)` groups
//! - Per-group medians with 95% confidence intervals

pub mod stats;
pub mod summary;

// Re-export main types and functions
pub use stats::{ci95, median, percentile};
pub use summary::{count_unsized, resolve_size, summarize, Metric};
