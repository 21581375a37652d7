use crate::parser::load_sources;
use crate::utils::config::{REPORT_SCHEMA_VERSION, REQUIRED_COLUMNS};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Load each source on its own and report what it contains
pub fn validate_sources(paths: &[PathBuf]) -> Result<usize> {
    if paths.is_empty() {
        anyhow::bail!("At least one benchmark CSV is required");
    }

    let mut total = 0;

    for path in paths {
        println!("Validating benchmark CSV: {}", path.display());

        let samples = load_sources(std::slice::from_ref(path))
            .with_context(|| format!("Invalid benchmark CSV: {}", path.display()))?;

        let ops: BTreeSet<&str> = samples.iter().map(|s| s.op.as_str()).collect();
        let dtypes: BTreeSet<&str> = samples.iter().map(|s| s.dtype.as_str()).collect();

        println!("✓ Valid benchmark CSV");
        println!("  Rows: {}", samples.len());
        println!("  Operations: {}", join(&ops));
        println!("  Dtypes: {}", join(&dtypes));

        total += samples.len();
    }

    Ok(total)
}

fn join(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<_>>().join(", ")
}

/// Display input schema information
pub fn display_schema(show_details: bool) {
    println!("Benchmark CSV Input Schema");
    println!("Required columns: {}", REQUIRED_COLUMNS.join(","));
    println!("Summary Report Version: {}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Column Details:");
        println!("  timestamp: any        - Passed through, not used");
        println!("  op: string            - Operation name (e.g., 'matmul_naive')");
        println!("  M, N, K: integer      - Matrix dimensions, empty or 0 if unused");
        println!("  size: integer         - Problem size, <= 0 means M*N*K");
        println!("  dtype: string         - Element type (e.g., 'float')");
        println!("  reps: integer         - Timed repetitions");
        println!("  ns_per_rep: float     - Nanoseconds per repetition");
        println!("  gflops: float         - Attained GFLOP/s");
        println!("  gbps: float           - Attained GB/s");
        println!("  checksum: any         - Result checksum, not used");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("bench-plot v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Summary statistics, speedup and roofline charts for micro-benchmark CSVs.");
}

/// True if `path` looks like a CSV file name
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
