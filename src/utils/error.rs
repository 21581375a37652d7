//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading benchmark CSV sources
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} missing columns: {}", source_path.display(), missing.join(", "))]
    MissingColumns {
        source_path: PathBuf,
        missing: Vec<String>,
    },

    #[error("Failed to read {}: {source}", source_path.display())]
    Csv {
        source_path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Cannot open {}: {source}", source_path.display())]
    Io {
        source_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No input sources given")]
    NoSources,
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    DrawingFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
