//! HPC Bench Plot CLI
//!
//! Turns raw micro-benchmark CSV rows into summary statistics,
//! throughput charts, speedup charts and a roofline plot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use hpc_bench_plot::commands::{
    display_schema, display_version, execute_plot, non_blank, validate_args, validate_sources,
    PlotArgs,
};
use hpc_bench_plot::render::RenderConfig;
use hpc_bench_plot::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_OUTDIR};

/// HPC Bench Plot - statistics and charts for micro-benchmark results
#[derive(Parser, Debug)]
#[command(name = "bench-plot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize benchmark CSVs and render charts
    Plot {
        /// Benchmark CSV files
        #[arg(required = true)]
        csvs: Vec<PathBuf>,

        /// Output directory for figures
        #[arg(short, long, default_value = DEFAULT_OUTDIR)]
        outdir: PathBuf,

        /// Baseline op for speedup (e.g., 'matmul_naive')
        #[arg(short, long)]
        baseline: Option<String>,

        /// Roofline peaks as GFLOPS:GBPS (e.g., 220:60)
        #[arg(short, long)]
        roofline: Option<String>,

        /// Output path for JSON summary report (optional)
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Chart width in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
        height: u32,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check that benchmark CSVs carry every required column
    Validate {
        /// Benchmark CSV files
        #[arg(required = true)]
        csvs: Vec<PathBuf>,
    },

    /// Display input schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Plot {
            csvs,
            outdir,
            baseline,
            roofline,
            summary_json,
            width,
            height,
            summary,
        } => {
            let args = PlotArgs {
                inputs: csvs,
                outdir,
                baseline: non_blank(baseline),
                roofline: non_blank(roofline),
                summary_json,
                render_config: RenderConfig::new().with_size(width, height),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_plot(args)?;
        }

        Commands::Validate { csvs } => {
            let rows = validate_sources(&csvs)?;
            println!("Total rows: {}", rows);
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
