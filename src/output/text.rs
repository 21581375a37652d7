//! Plain-text summary table for stdout.

use crate::parser::schema::{ComparativeRow, SummaryRow};
use std::fmt::Write;

/// Format summary rows as an aligned text table
pub fn format_summary_table(rows: &[SummaryRow]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<20} {:<8} {:>12} {:>4} {:>22} {:>22} {:>14}",
        "op", "dtype", "size", "n", "GFLOP/s [-lo, +hi]", "GB/s [-lo, +hi]", "t (s)"
    );
    let _ = writeln!(out, "{}", "-".repeat(108));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:>12} {:>4} {:>22} {:>22} {:>14.6e}",
            row.op,
            row.dtype,
            row.size,
            row.samples,
            format!("{:.3} [-{:.3}, +{:.3}]", row.gflops.median, row.gflops.lo, row.gflops.hi),
            format!("{:.3} [-{:.3}, +{:.3}]", row.gbps.median, row.gbps.lo, row.gbps.hi),
            row.t.median,
        );
    }

    out
}

/// Format speedup rows, one per line
pub fn format_speedup_table(baseline: &str, rows: &[ComparativeRow]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Speedup vs {}:", baseline);
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<20} {:<8} {:>12} {:>8.2}x",
            row.op, row.dtype, row.size, row.speedup
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::MetricSummary;

    #[test]
    fn test_summary_table_has_row_per_group() {
        let at = |median| MetricSummary { median, lo: 0.0, hi: 0.0 };
        let rows = vec![SummaryRow {
            op: "scan".to_string(),
            size: 4096,
            dtype: "float".to_string(),
            samples: 3,
            gflops: at(1.0),
            gbps: at(2.0),
            t: at(0.5),
        }];

        let table = format_summary_table(&rows);

        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("scan"));
        assert!(table.contains("4096"));
    }

    #[test]
    fn test_speedup_table() {
        let rows = vec![ComparativeRow {
            op: "matmul_blocked".to_string(),
            dtype: "float".to_string(),
            size: 1024,
            speedup: 3.25,
        }];

        let table = format_speedup_table("matmul_naive", &rows);

        assert!(table.starts_with("Speedup vs matmul_naive:"));
        assert!(table.contains("3.25x"));
    }
}
