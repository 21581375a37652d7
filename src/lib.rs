//! HPC Bench Plot
//!
//! Summary statistics and charts for micro-benchmark results:
//! throughput vs problem size, speedup relative to a baseline
//! operation, and roofline placement.
//!
//! This crate provides the core implementation for the
//! `bench-plot` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! bench-plot plot results.csv --baseline matmul_naive --roofline 220:60
//! bench-plot --help
//! ```
//!
//! ## Pipeline
//!
//! raw CSV rows → [`parser`] → [`aggregator`] → [`derived`] → [`render`]

pub mod aggregator;
pub mod commands;
pub mod derived;
pub mod output;
pub mod parser;
pub mod render;
pub mod utils;
