//! Roofline placement of summary rows.
//!
//! Each row is placed at its arithmetic intensity (GFLOP/s over GB/s,
//! i.e. FLOPs per byte) against its attained GFLOP/s. The ceiling is the
//! two-regime `min(peak_flops, peak_bw * intensity)` curve.

use crate::parser::schema::{IntensityPoint, SummaryRow};
use crate::utils::config::{ROOFLINE_INTENSITY_RANGE, ROOFLINE_SWEEP_POINTS};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Points placed on the roofline plus the count of rows left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RooflineTable {
    pub points: Vec<IntensityPoint>,

    /// Rows with non-positive or non-finite bandwidth, or a non-finite intensity
    pub excluded: usize,
}

/// Compute intensity points for every row with a usable bandwidth
///
/// **Public** - main entry point for roofline placement
pub fn intensity_points(rows: &[SummaryRow]) -> RooflineTable {
    let mut table = RooflineTable::default();

    for row in rows {
        let gflops = row.gflops.median;
        let gbps = row.gbps.median;

        if !gbps.is_finite() || gbps <= 0.0 {
            table.excluded += 1;
            continue;
        }

        let intensity = gflops / gbps;
        if !intensity.is_finite() {
            table.excluded += 1;
            continue;
        }

        table.points.push(IntensityPoint {
            op: row.op.clone(),
            dtype: row.dtype.clone(),
            size: row.size,
            intensity,
            gflops,
        });
    }

    debug!(
        "Roofline: {} points, {} rows excluded",
        table.points.len(),
        table.excluded
    );

    table
}

/// Peak compute (GFLOP/s) and peak bandwidth (GB/s) of a machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RooflineCeiling {
    pub peak_flops: f64,
    pub peak_bw: f64,
}

impl RooflineCeiling {
    pub fn new(peak_flops: f64, peak_bw: f64) -> Result<Self, RooflineParseError> {
        if !(peak_flops > 0.0 && peak_flops.is_finite()) || !(peak_bw > 0.0 && peak_bw.is_finite()) {
            return Err(RooflineParseError::NonPositive);
        }
        Ok(Self { peak_flops, peak_bw })
    }

    /// Attainable GFLOP/s at `intensity`
    pub fn ceiling(&self, intensity: f64) -> f64 {
        self.peak_flops.min(self.peak_bw * intensity)
    }

    /// Intensity where the memory-bound and compute-bound regimes meet
    pub fn ridge_point(&self) -> f64 {
        self.peak_flops / self.peak_bw
    }

    /// Log-spaced `(intensity, ceiling)` pairs over `[lo, hi]`
    pub fn sweep_range(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        let (lo_exp, hi_exp) = (lo.log10(), hi.log10());
        let steps = points.saturating_sub(1).max(1) as f64;

        (0..points)
            .map(|i| {
                let intensity = 10f64.powf(lo_exp + (hi_exp - lo_exp) * i as f64 / steps);
                (intensity, self.ceiling(intensity))
            })
            .collect()
    }

    /// Reference curve over the default intensity range
    pub fn sweep(&self) -> Vec<(f64, f64)> {
        let (lo, hi) = ROOFLINE_INTENSITY_RANGE;
        self.sweep_range(lo, hi, ROOFLINE_SWEEP_POINTS)
    }
}

impl fmt::Display for RooflineCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Roofline ({:.1} GF/s, {:.1} GB/s)", self.peak_flops, self.peak_bw)
    }
}

/// Errors parsing a `GFLOPS:GBPS` roofline specification
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RooflineParseError {
    #[error("expected 'GFLOPS:GBPS' (e.g., 220:60)")]
    Format,

    #[error("invalid number: {0}")]
    Number(String),

    #[error("peak rates must be positive")]
    NonPositive,
}

impl FromStr for RooflineCeiling {
    type Err = RooflineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (flops, bw) = s.split_once(':').ok_or(RooflineParseError::Format)?;

        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| RooflineParseError::Number(value.trim().to_string()))
        };

        RooflineCeiling::new(parse(flops)?, parse(bw)?)
    }
}
