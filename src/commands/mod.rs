//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod plot;
pub mod utils;

// Re-export main command functions
pub use plot::{
    derive_metrics, execute_plot, non_blank, parse_roofline, run_pipeline, summarize_samples,
    validate_args, PipelineOutput, PlotArgs,
};
pub use utils::{display_schema, display_version, validate_sources};
