//! Cross-group comparative metrics.
//!
//! - Speedup of each operation over a baseline operation
//! - Arithmetic intensity for roofline placement

pub mod roofline;
pub mod speedup;

pub use roofline::{intensity_points, RooflineCeiling, RooflineParseError, RooflineTable};
pub use speedup::{compute_speedups, SpeedupTable};
