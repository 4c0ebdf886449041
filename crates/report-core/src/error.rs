use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the encounter report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be parsed into an encounter row.
    #[error("Failed to parse CSV record: {0}")]
    CsvParse(#[from] csv::Error),

    /// A date string did not match any recognised format.
    #[error("Invalid date value: {0}")]
    DateParse(String),

    /// The input file contained a header but no data rows.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(PathBuf),

    /// The results document could not be serialized.
    #[error("Failed to serialize results: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// The results file could not be written to disk.
    #[error("Failed to write results file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
