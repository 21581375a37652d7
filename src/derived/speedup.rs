//! Speedup of each operation relative to a baseline operation.

use crate::parser::schema::{ComparativeRow, SummaryRow};
use log::debug;
use std::collections::HashMap;

/// Result of joining summary rows against a baseline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedupTable {
    /// Joined rows, in summary order
    pub rows: Vec<ComparativeRow>,

    /// Number of summary rows that belong to the baseline
    pub baseline_rows: usize,

    /// Non-baseline rows with no baseline row at the same `(size, dtype)`
    pub unmatched: usize,
}

impl SpeedupTable {
    /// True when the baseline operation has no rows at all
    pub fn baseline_missing(&self) -> bool {
        self.baseline_rows == 0
    }
}

/// Join every non-baseline row with the baseline row at the same
/// `(size, dtype)` and compute `t_baseline / t`
///
/// **Public** - main entry point for speedup calculation
///
/// Rows without a baseline partner are skipped and counted in
/// `SpeedupTable::unmatched`.
pub fn compute_speedups(rows: &[SummaryRow], baseline: &str) -> SpeedupTable {
    let baseline_t: HashMap<(i64, &str), f64> = rows
        .iter()
        .filter(|row| row.op == baseline)
        .map(|row| ((row.size, row.dtype.as_str()), row.t.median))
        .collect();

    let mut table = SpeedupTable {
        baseline_rows: baseline_t.len(),
        ..Default::default()
    };

    for row in rows.iter().filter(|row| row.op != baseline) {
        match baseline_t.get(&(row.size, row.dtype.as_str())) {
            Some(t_base) => table.rows.push(ComparativeRow {
                op: row.op.clone(),
                dtype: row.dtype.clone(),
                size: row.size,
                speedup: t_base / row.t.median,
            }),
            None => table.unmatched += 1,
        }
    }

    debug!(
        "Speedup vs {}: {} rows joined, {} without baseline match",
        baseline,
        table.rows.len(),
        table.unmatched
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::MetricSummary;

    fn row(op: &str, size: i64, dtype: &str, t: f64) -> SummaryRow {
        SummaryRow {
            op: op.to_string(),
            size,
            dtype: dtype.to_string(),
            samples: 1,
            gflops: MetricSummary::default(),
            gbps: MetricSummary::default(),
            t: MetricSummary { median: t, lo: 0.0, hi: 0.0 },
        }
    }

    #[test]
    fn test_speedup_join() {
        let rows = vec![row("base", 100, "f32", 2.0), row("fast", 100, "f32", 0.5)];
        let table = compute_speedups(&rows, "base");

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].op, "fast");
        assert_eq!(table.rows[0].speedup, 4.0);
        assert_eq!(table.unmatched, 0);
    }

    #[test]
    fn test_speedup_requires_matching_dtype() {
        let rows = vec![row("base", 100, "f32", 2.0), row("fast", 100, "f64", 0.5)];
        let table = compute_speedups(&rows, "base");

        assert!(table.rows.is_empty());
        assert_eq!(table.unmatched, 1);
    }

    #[test]
    fn test_speedup_without_baseline() {
        let rows = vec![row("fast", 100, "f32", 0.5)];
        let table = compute_speedups(&rows, "missing");

        assert!(table.baseline_missing());
        assert!(table.rows.is_empty());
        assert_eq!(table.unmatched, 1);
    }
}
