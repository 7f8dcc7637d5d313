//! Metadata about a loaded data file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk container of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Delimited text; the delimiter is recorded separately.
    Delimited,
    /// Spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
}

impl SourceFormat {
    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "tab" | "txt" | "psv" => Some(SourceFormat::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Workbook),
            _ => None,
        }
    }
}

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, xlsx, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.CSV")), Some(SourceFormat::Delimited));
        assert_eq!(SourceFormat::from_path(Path::new("a.tsv")), Some(SourceFormat::Delimited));
        assert_eq!(SourceFormat::from_path(Path::new("a.xlsx")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("a.xls")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("a.pdf")), None);
        assert_eq!(SourceFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_file_name() {
        let meta = SourceMetadata::new(
            PathBuf::from("/data/sales.csv"),
            "sha256:00".into(),
            10,
            "csv".into(),
            2,
            3,
        );
        assert_eq!(meta.file, "sales.csv");
    }
}
