//! Plot command implementation.
//!
//! The plot command:
//! 1. Loads and merges the benchmark CSV sources
//! 2. Summarises samples per (op, size, dtype)
//! 3. Derives speedups and roofline placement
//! 4. Renders charts
//! 5. Writes the optional JSON report and text summary

use super::utils::has_csv_extension;
use crate::aggregator::{count_unsized, summarize, Metric};
use crate::derived::{compute_speedups, intensity_points, RooflineCeiling, RooflineTable, SpeedupTable};
use crate::output::{format_speedup_table, format_summary_table, write_report};
use crate::parser::schema::{Diagnostics, RawSample, SummaryReport, SummaryRow};
use crate::parser::load_sources;
use crate::render::{render_metric_charts, render_roofline_chart, render_speedup_chart, RenderConfig};
use crate::utils::config::{DEFAULT_OUTDIR, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the plot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Benchmark CSV sources, merged in order
    pub inputs: Vec<PathBuf>,

    /// Output directory for charts
    pub outdir: PathBuf,

    /// Baseline operation for speedup charts
    pub baseline: Option<String>,

    /// Roofline peaks as "GFLOPS:GBPS"
    pub roofline: Option<String>,

    /// Output path for the JSON summary report (optional)
    pub summary_json: Option<PathBuf>,

    /// Chart dimensions
    pub render_config: RenderConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            baseline: None,
            roofline: None,
            summary_json: None,
            render_config: RenderConfig::default(),
            print_summary: false,
        }
    }
}

/// Tables produced by the statistical pipeline, ready for rendering
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub summary: Vec<SummaryRow>,

    /// Present when a baseline was requested
    pub speedups: Option<SpeedupTable>,

    /// Present when a roofline was requested
    pub roofline: Option<(RooflineTable, RooflineCeiling)>,
}

impl PipelineOutput {
    /// Counts of rows the derived-metric engine left out
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            unmatched_speedup_rows: self.speedups.as_ref().map_or(0, |s| s.unmatched),
            excluded_roofline_rows: self.roofline.as_ref().map_or(0, |(r, _)| r.excluded),
        }
    }

    /// Build the JSON report
    pub fn to_report(&self, baseline: Option<&str>) -> SummaryReport {
        use chrono::Utc;

        SummaryReport {
            version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            baseline: baseline.map(str::to_string),
            summary: self.summary.clone(),
            speedups: self.speedups.as_ref().map(|s| s.rows.clone()).unwrap_or_default(),
            roofline: self.roofline.as_ref().map(|(r, _)| r.points.clone()).unwrap_or_default(),
            diagnostics: self.diagnostics(),
        }
    }
}

/// Run aggregation and derived metrics over already-loaded samples
///
/// **Public** - everything between loading and rendering
pub fn run_pipeline(
    samples: &[RawSample],
    baseline: Option<&str>,
    roofline: Option<RooflineCeiling>,
) -> PipelineOutput {
    derive_metrics(summarize_samples(samples), baseline, roofline)
}

/// Group samples into summary rows, warning about samples with no usable size
pub fn summarize_samples(samples: &[RawSample]) -> Vec<SummaryRow> {
    let unsized_samples = count_unsized(samples);
    if unsized_samples > 0 {
        warn!(
            "{} samples have no usable size (size <= 0 and M <= 0); grouped under their raw size",
            unsized_samples
        );
    }

    summarize(samples)
}

/// Attach speedup and roofline tables to already-summarized rows
pub fn derive_metrics(
    summary: Vec<SummaryRow>,
    baseline: Option<&str>,
    roofline: Option<RooflineCeiling>,
) -> PipelineOutput {
    let speedups = baseline.map(|baseline| {
        let table = compute_speedups(&summary, baseline);
        if table.baseline_missing() {
            warn!("no rows for baseline '{}'", baseline);
        } else if table.unmatched > 0 {
            warn!(
                "{} rows excluded from speedup: no '{}' row at the same size and dtype",
                table.unmatched, baseline
            );
        }
        table
    });

    let roofline = roofline.map(|ceiling| {
        let table = intensity_points(&summary);
        if table.excluded > 0 {
            warn!(
                "{} rows excluded from roofline: non-positive or non-finite bandwidth",
                table.excluded
            );
        }
        (table, ceiling)
    });

    PipelineOutput {
        summary,
        speedups,
        roofline,
    }
}

/// Treat a blank option value as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the roofline option, warning and skipping on bad input
pub fn parse_roofline(spec: Option<&str>) -> Option<RooflineCeiling> {
    let spec = spec?;
    match spec.parse::<RooflineCeiling>() {
        Ok(ceiling) => Some(ceiling),
        Err(e) => {
            warn!("--roofline '{}': {}; skipping roofline", spec, e);
            None
        }
    }
}

/// Execute the plot command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing columns or malformed rows in any source
/// * Chart rendering failures
/// * Report write errors
pub fn execute_plot(args: PlotArgs) -> Result<PipelineOutput> {
    let start_time = Instant::now();

    info!("Plotting {} benchmark sources", args.inputs.len());

    // Step 1: Load sources
    info!("Step 1/5: Loading benchmark CSVs...");
    let samples = load_sources(&args.inputs).context("Failed to load benchmark CSVs")?;

    debug!("Loaded {} samples", samples.len());

    let baseline = non_blank(args.baseline.clone());

    // Step 2: Aggregate
    info!("Step 2/5: Summarizing samples...");
    let summary = summarize_samples(&samples);

    info!("Summarized into {} groups", summary.len());

    // Step 3: Derive
    info!("Step 3/5: Deriving speedup and roofline metrics...");
    let ceiling = parse_roofline(args.roofline.as_deref());
    let output = derive_metrics(summary, baseline.as_deref(), ceiling);

    // Step 4: Render charts
    info!("Step 4/5: Rendering charts to {}...", args.outdir.display());
    for metric in [Metric::Gflops, Metric::Gbps] {
        render_metric_charts(&output.summary, metric, &args.outdir, &args.render_config)
            .with_context(|| format!("Failed to render {} charts", metric.name()))?;
    }

    if let (Some(baseline), Some(speedups)) = (&baseline, &output.speedups) {
        render_speedup_chart(&output.summary, speedups, baseline, &args.outdir, &args.render_config)
            .context("Failed to render speedup chart")?;
    }

    if let Some((table, ceiling)) = &output.roofline {
        render_roofline_chart(&table.points, ceiling, &args.outdir, &args.render_config)
            .context("Failed to render roofline chart")?;
    }

    // Step 5: Report
    info!("Step 5/5: Writing report...");
    if let Some(path) = &args.summary_json {
        write_report(&output.to_report(baseline.as_deref()), path)
            .context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", format_summary_table(&output.summary));
        if let (Some(baseline), Some(speedups)) = (&baseline, &output.speedups) {
            println!("{}", format_speedup_table(baseline, &speedups.rows));
        }
    }

    let elapsed = start_time.elapsed();
    info!("✓ Wrote figures to {}/ in {:.2}s", args.outdir.display(), elapsed.as_secs_f64());

    Ok(output)
}

/// Validate plot arguments
///
/// **Public** - can be called before execute_plot for early validation
pub fn validate_args(args: &PlotArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one benchmark CSV is required");
    }

    for input in &args.inputs {
        if !input.is_file() {
            anyhow::bail!("Input file not found: {}", input.display());
        }

        if !has_csv_extension(input) {
            warn!("{} does not have a .csv extension", input.display());
        }
    }

    if args.outdir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    if args.outdir.is_file() {
        anyhow::bail!("Output directory is a file: {}", args.outdir.display());
    }

    if args.render_config.width == 0 || args.render_config.height == 0 {
        anyhow::bail!("Chart width and height must be greater than 0");
    }

    Ok(())
}
