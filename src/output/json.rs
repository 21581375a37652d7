//! JSON summary report.
//!
//! The report is written next to the charts (or wherever `--summary-json`
//! points) and can be read back for comparison between runs.

use crate::parser::schema::SummaryReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write `report` as pretty-printed JSON, creating missing parent directories
///
/// # Errors
/// * `OutputError::InvalidPath` - `path` is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` / `SerializationFailed` - the file could not be written
pub fn write_report(report: &SummaryReport, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();

    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "not a file path: '{}'",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(OutputError::WriteFailed)?);
    serde_json::to_writer_pretty(&mut writer, report).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Report: {} summary rows, {} speedups, {} roofline points -> {}",
        report.summary.len(),
        report.speedups.len(),
        report.roofline.len(),
        path.display()
    );

    Ok(())
}

/// Load a report written by [`write_report`]
pub fn read_report(path: impl AsRef<Path>) -> Result<SummaryReport, OutputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(OutputError::WriteFailed)?;
    let report: SummaryReport =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Loaded report v{} from {} ({} rows)",
        report.version,
        path.display(),
        report.summary.len()
    );
    Ok(report)
}
