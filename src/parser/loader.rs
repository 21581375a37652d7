//! Benchmark CSV loader.
//!
//! Reads one or more CSV sources written by the benchmark driver, checks
//! that each carries the full column set and concatenates them into a
//! single sample sequence. Row order within a source and source order
//! are both preserved; nothing is deduplicated.

use super::schema::RawSample;
use crate::utils::config::REQUIRED_COLUMNS;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Load and merge every source, failing on the first bad one
///
/// **Public** - main entry point for loading
///
/// # Errors
/// * `LoadError::NoSources` - empty source list
/// * `LoadError::Io` - a source cannot be opened
/// * `LoadError::MissingColumns` - a source lacks required columns
/// * `LoadError::Csv` - a row cannot be parsed
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawSample>, LoadError> {
    if paths.is_empty() {
        return Err(LoadError::NoSources);
    }

    let mut samples = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            source_path: path.to_path_buf(),
            source,
        })?;

        let rows = load_reader(file, path)?;
        info!("Loaded {} rows from {}", rows.len(), path.display());
        samples.extend(rows);
    }

    debug!("Merged {} samples from {} sources", samples.len(), paths.len());

    Ok(samples)
}

/// Load a single source from any reader
///
/// `source_path` is only used to label errors.
pub fn load_reader<R: Read>(
    reader: R,
    source_path: impl Into<PathBuf>,
) -> Result<Vec<RawSample>, LoadError> {
    let source_path = source_path.into();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|source| LoadError::Csv {
        source_path: source_path.clone(),
        source,
    })?;

    let missing = check_columns(headers.iter());
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            source_path,
            missing,
        });
    }

    csv_reader
        .deserialize::<RawSample>()
        .map(|row| {
            row.map_err(|source| LoadError::Csv {
                source_path: source_path.clone(),
                source,
            })
        })
        .collect()
}

/// Required columns absent from `headers`, in canonical order
pub fn check_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<&str> = headers.into_iter().collect();

    REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(*column))
        .map(|column| column.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "timestamp,op,M,N,K,size,dtype,reps,ns_per_rep,gflops,gbps,checksum";

    #[test]
    fn test_check_columns_complete() {
        assert!(check_columns(HEADER.split(',')).is_empty());
    }

    #[test]
    fn test_check_columns_order_independent() {
        let mut columns: Vec<&str> = HEADER.split(',').collect();
        columns.reverse();
        assert!(check_columns(columns).is_empty());
    }

    #[test]
    fn test_check_columns_reports_missing() {
        let missing = check_columns(["timestamp", "op", "size", "dtype"]);
        assert_eq!(
            missing,
            vec!["M", "N", "K", "reps", "ns_per_rep", "gflops", "gbps", "checksum"]
        );
    }

    #[test]
    fn test_load_reader_parses_rows() {
        let data = format!(
            "{}\n1700000000,matmul_naive,64,64,64,0,float,7,1500,0.35,0.12,12.5\n\
             1700000001,reduction,0,0,0,1024,double,7,300,3.4,27.3,99\n",
            HEADER
        );

        let rows = load_reader(data.as_bytes(), "inline.csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].op, "matmul_naive");
        assert_eq!(rows[0].m, 64);
        assert_eq!(rows[0].size, 0);
        assert_eq!(rows[1].size, 1024);
        assert_eq!(rows[1].ns_per_rep, 300.0);
    }

    #[test]
    fn test_load_reader_empty_dimensions_default_to_zero() {
        let data = format!("{}\n1,scan,,,,4096,float,3,10,1.0,2.0,0\n", HEADER);
        let rows = load_reader(data.as_bytes(), "inline.csv").unwrap();

        assert_eq!((rows[0].m, rows[0].n, rows[0].k), (0, 0, 0));
    }

    #[test]
    fn test_load_reader_missing_column_fails() {
        let data = "timestamp,op,size,dtype\n1,scan,10,float\n";
        let err = load_reader(data.as_bytes(), "bad.csv").unwrap_err();

        match err {
            LoadError::MissingColumns { source_path, missing } => {
                assert_eq!(source_path, PathBuf::from("bad.csv"));
                assert!(missing.contains(&"ns_per_rep".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_sources_empty_list() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(load_sources(&paths), Err(LoadError::NoSources)));
    }
}
