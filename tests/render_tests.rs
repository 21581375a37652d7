mod common;

use common::{write_csv, HEADER};
use hpc_bench_plot::commands::{execute_plot, PlotArgs};
use hpc_bench_plot::derived::RooflineCeiling;
use hpc_bench_plot::parser::IntensityPoint;
use hpc_bench_plot::render::{render_roofline_chart, RenderConfig};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn written_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Width and height from a PNG's IHDR chunk
fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let be = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    (be(16), be(20))
}

fn plot_args(input: &Path, outdir: PathBuf) -> PlotArgs {
    PlotArgs {
        inputs: vec![input.to_path_buf()],
        outdir,
        render_config: RenderConfig::new().with_size(480, 320),
        ..Default::default()
    }
}

fn bench_csv() -> tempfile::NamedTempFile {
    write_csv(&[
        HEADER,
        "1,matmul_naive,32,32,32,0,float,7,4000000,0.016,0.003,1",
        "2,matmul_naive,64,64,64,0,float,7,32000000,0.016,0.003,1",
        "3,matmul_blocked,32,32,32,0,float,7,1000000,0.065,0.012,1",
        "4,matmul_blocked,64,64,64,0,float,7,7000000,0.075,0.014,1",
        "5,reduction,0,0,0,1024,float,7,500,2.0,8.0,1",
        "6,reduction,0,0,0,4096,float,7,1900,2.1,8.4,1",
    ])
}

#[test]
fn test_plot_writes_every_chart() {
    let input = bench_csv();
    let outdir = tempfile::tempdir().unwrap();
    let report_dir = tempfile::tempdir().unwrap();

    let mut args = plot_args(input.path(), outdir.path().to_path_buf());
    args.baseline = Some("matmul_naive".to_string());
    args.roofline = Some("220:60".to_string());
    args.summary_json = Some(report_dir.path().join("summary.json"));

    let output = execute_plot(args).unwrap();

    assert_eq!(
        written_files(outdir.path()),
        vec![
            "gbps_matmul_blocked.png",
            "gbps_matmul_naive.png",
            "gbps_reduction.png",
            "gflops_matmul_blocked.png",
            "gflops_matmul_naive.png",
            "gflops_reduction.png",
            "roofline.png",
            "speedup_vs_matmul_naive.png",
        ]
    );
    assert_eq!(output.speedups.unwrap().rows.len(), 2);
    assert!(report_dir.path().join("summary.json").is_file());
}

#[test]
fn test_charts_use_requested_size() {
    let input = bench_csv();
    let outdir = tempfile::tempdir().unwrap();

    let mut args = plot_args(input.path(), outdir.path().to_path_buf());
    args.roofline = Some("220:60".to_string());
    execute_plot(args).unwrap();

    assert_eq!(png_dimensions(&outdir.path().join("gflops_reduction.png")), (480, 320));
    assert_eq!(png_dimensions(&outdir.path().join("roofline.png")), (480, 320));
}

#[test]
fn test_header_only_with_missing_baseline() {
    let input = write_csv(&[HEADER]);
    let outdir = tempfile::tempdir().unwrap();

    let mut args = plot_args(input.path(), outdir.path().to_path_buf());
    args.baseline = Some("nope".to_string());

    let output = execute_plot(args).unwrap();

    assert!(output.summary.is_empty());
    assert!(output.speedups.unwrap().baseline_missing());
    // No ops means no metric charts; the speedup chart carries the empty notice
    assert_eq!(written_files(outdir.path()), vec!["speedup_vs_nope.png"]);
}

#[test]
fn test_missing_outdir_is_created() {
    let input = write_csv(&[
        HEADER,
        "1,scan,0,0,0,0,float,7,500,1.0,8.0,0",
        "2,scan,0,0,0,0,float,7,520,0.9,7.5,0",
    ]);
    let root = tempfile::tempdir().unwrap();
    let outdir = root.path().join("figures").join("sub");

    execute_plot(plot_args(input.path(), outdir.clone())).unwrap();

    assert!(outdir.is_dir());
    assert_eq!(written_files(&outdir), vec!["gbps_scan.png", "gflops_scan.png"]);
}

#[test]
fn test_blank_baseline_skips_speedup_chart() {
    let input = bench_csv();
    let outdir = tempfile::tempdir().unwrap();

    let mut args = plot_args(input.path(), outdir.path().to_path_buf());
    args.baseline = Some("  ".to_string());

    let output = execute_plot(args).unwrap();

    assert!(output.speedups.is_none());
    assert!(written_files(outdir.path())
        .iter()
        .all(|name| !name.starts_with("speedup_vs_")));
}

#[test]
fn test_malformed_roofline_skips_chart() {
    let input = bench_csv();
    let outdir = tempfile::tempdir().unwrap();

    let mut args = plot_args(input.path(), outdir.path().to_path_buf());
    args.roofline = Some("fast".to_string());

    let output = execute_plot(args).unwrap();

    assert!(output.roofline.is_none());
    assert!(!outdir.path().join("roofline.png").exists());
}

#[test]
fn test_roofline_skips_non_positive_points() {
    let outdir = tempfile::tempdir().unwrap();
    let point = |op: &str, intensity: f64, gflops: f64| IntensityPoint {
        op: op.to_string(),
        dtype: "float".to_string(),
        size: 1024,
        intensity,
        gflops,
    };
    let points = vec![
        point("idle", 0.0, 0.0),
        point("zero_flops", 2.0, 0.0),
        point("reduction", 0.25, 2.0),
    ];

    let path = render_roofline_chart(
        &points,
        &RooflineCeiling::new(220.0, 60.0).unwrap(),
        outdir.path(),
        &RenderConfig::new().with_size(400, 300),
    )
    .unwrap();

    assert_eq!(path, outdir.path().join("roofline.png"));
    assert_eq!(png_dimensions(&path), (400, 300));
}
