#![allow(dead_code)]

use hpc_bench_plot::parser::RawSample;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "timestamp,op,M,N,K,size,dtype,reps,ns_per_rep,gflops,gbps,checksum";

pub fn sample(op: &str, size: i64, dtype: &str, ns_per_rep: f64, gflops: f64, gbps: f64) -> RawSample {
    RawSample {
        timestamp: "1700000000".to_string(),
        op: op.to_string(),
        m: 0,
        n: 0,
        k: 0,
        size,
        dtype: dtype.to_string(),
        reps: 7,
        ns_per_rep,
        gflops,
        gbps,
        checksum: "0".to_string(),
    }
}

pub fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}
