mod common;

use common::{write_csv, HEADER};
use hpc_bench_plot::parser::load_sources;
use hpc_bench_plot::utils::error::LoadError;
use std::path::PathBuf;

#[test]
fn test_load_sources_preserves_order() {
    let first = write_csv(&[
        HEADER,
        "1,matmul_naive,64,64,64,0,float,7,2000,0.26,0.05,1.5",
        "2,matmul_naive,128,128,128,0,float,7,16000,0.26,0.03,2.5",
    ]);
    let second = write_csv(&[
        // columns reordered; matching is by name
        "op,timestamp,size,M,N,K,dtype,reps,ns_per_rep,gflops,gbps,checksum,extra",
        "reduction,3,1024,0,0,0,double,7,300,3.4,27.3,99,ignored",
    ]);

    let samples = load_sources(&[first.path(), second.path()]).unwrap();

    let ops: Vec<(&str, &str)> = samples
        .iter()
        .map(|s| (s.op.as_str(), s.timestamp.as_str()))
        .collect();
    assert_eq!(
        ops,
        vec![("matmul_naive", "1"), ("matmul_naive", "2"), ("reduction", "3")]
    );
    assert_eq!(samples[1].m, 128);
    assert_eq!(samples[2].size, 1024);
}

#[test]
fn test_load_sources_keeps_duplicates() {
    let row = "1,scan,0,0,0,4096,float,7,500,1.0,8.0,0";
    let file = write_csv(&[HEADER, row, row]);

    let samples = load_sources(&[file.path(), file.path()]).unwrap();

    assert_eq!(samples.len(), 4);
}

#[test]
fn test_missing_columns_names_source_and_columns() {
    let good = write_csv(&[HEADER, "1,scan,0,0,0,4096,float,7,500,1.0,8.0,0"]);
    let bad = write_csv(&["timestamp,op,size,dtype,reps", "1,scan,4096,float,7"]);

    let err = load_sources(&[good.path(), bad.path()]).unwrap_err();
    let message = err.to_string();

    match &err {
        LoadError::MissingColumns { source_path, missing } => {
            assert_eq!(source_path, bad.path());
            assert_eq!(
                missing,
                &vec!["M", "N", "K", "ns_per_rep", "gflops", "gbps", "checksum"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(message.contains(&bad.path().display().to_string()));
    assert!(message.contains("ns_per_rep"));
}

#[test]
fn test_missing_file() {
    let err = load_sources(&[PathBuf::from("/nonexistent/results.csv")]).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_malformed_row() {
    let file = write_csv(&[HEADER, "1,scan,0,0,0,4096,float,7,not-a-number,1.0,8.0,0"]);

    let err = load_sources(&[file.path()]).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }));
}
