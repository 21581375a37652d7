//! Output writers for summary data.
//!
//! This module handles writing aggregated tables:
//! - JSON summary reports
//! - Text summaries for stdout
//!
//! Charts are written by the `render` module.

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report, write_report};
pub use text::{format_speedup_table, format_summary_table};
