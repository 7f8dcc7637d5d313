//! Error types for the sheetlens library.
//!
//! Only the boundary (loading, configuration, export) can fail. The analyzers
//! themselves never return an error: faults inside an analysis are recorded as
//! error markers in the produced result tables.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sheetlens operations.
#[derive(Debug, Error)]
pub enum SheetLensError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns of a table have different lengths.
    #[error("Ragged table: {0}")]
    Shape(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing report output.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for sheetlens operations.
pub type Result<T> = std::result::Result<T, SheetLensError>;
