//! Chart rendering for summary, speedup and roofline tables.
//!
//! Pure consumer of the aggregated tables; all file output for charts
//! happens here.

pub mod charts;

// Re-export main types
pub use charts::{
    render_metric_charts,
    render_roofline_chart,
    render_speedup_chart,
    RenderConfig,
};
