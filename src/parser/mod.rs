//! Input loading and table definitions.
//!
//! This module handles:
//! - Reading benchmark CSV sources
//! - Validating the required column set
//! - Defining the summary, speedup and roofline tables

pub mod loader;
pub mod schema;

// Re-export main types
pub use loader::{check_columns, load_reader, load_sources};
pub use schema::{
    ComparativeRow, Diagnostics, IntensityPoint, MetricSummary, RawSample, SummaryReport,
    SummaryRow,
};
