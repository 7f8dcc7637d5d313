//! Main SheetLens struct and public API.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::AnalysisConfig;
use crate::data::Table;
use crate::error::{Result, SheetLensError};
use crate::inference::DateColumnDetector;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::report::{self, Report, ReportAssembler, Sheet};

/// Configuration for loading and analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLensConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Analysis thresholds.
    pub analysis: AnalysisConfig,
}

impl SheetLensConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SheetLensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SheetLensError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }
}

/// Overview of a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    /// Missing cells across the whole table.
    pub missing_total: usize,
    pub column_names: Vec<String>,
    pub has_date_columns: bool,
    pub date_columns: Vec<String>,
}

impl DatasetSummary {
    pub fn from_table(table: &Table) -> Self {
        let date_columns = DateColumnDetector::detect(table);
        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            missing_total: table.missing_count(),
            column_names: table.column_names().into_iter().map(String::from).collect(),
            has_date_columns: !date_columns.is_empty(),
            date_columns,
        }
    }
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Overview of the loaded table.
    pub summary: DatasetSummary,
    /// Every analysis with its insights.
    pub report: Report,
    /// The loaded table, kept for export.
    #[serde(skip)]
    pub table: Table,
}

impl AnalysisOutcome {
    /// Report sheets followed by the source table.
    pub fn sheets(&self) -> Vec<Sheet> {
        report::sheets(&self.report, &self.table)
    }

    /// Write CSV sheets and `report.json` into `dir`.
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        report::export(&self.report, &self.table, dir)
    }
}

/// Loads spreadsheet data and produces analytical reports.
pub struct SheetLens {
    parser: Parser,
    assembler: ReportAssembler,
}

impl SheetLens {
    /// Create a SheetLens instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(SheetLensConfig::default())
    }

    /// Create a SheetLens instance with custom configuration.
    pub fn with_config(config: SheetLensConfig) -> Self {
        Self {
            assembler: ReportAssembler::with_config(&config.analysis),
            parser: Parser::with_config(config.parser),
        }
    }

    /// Load a file into a typed table.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Load a file and run every analysis over it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisOutcome> {
        let path = path.as_ref();
        info!(path = %path.display(), "analyzing file");

        let (table, source) = self.load(path)?;
        let summary = DatasetSummary::from_table(&table);
        let report = self.analyze_table(&table);

        Ok(AnalysisOutcome {
            source,
            summary,
            report,
            table,
        })
    }

    /// Run every analysis over an already loaded table.
    pub fn analyze_table(&self, table: &Table) -> Report {
        self.assembler.assemble(table)
    }

    /// Load a file and summarize it without analyzing.
    pub fn summarize(&self, path: impl AsRef<Path>) -> Result<(DatasetSummary, SourceMetadata)> {
        let (table, source) = self.load(path)?;
        Ok((DatasetSummary::from_table(&table), source))
    }
}

impl Default for SheetLens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_summary() {
        let table = Table::new(vec![
            Column::from_raw("when", &["2024-01-01", "NA"]),
            Column::numeric("value", &[Some(1.0), None]),
        ])
        .unwrap();
        let summary = DatasetSummary::from_table(&table);

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.missing_total, 2);
        assert!(summary.has_date_columns);
        assert_eq!(summary.date_columns, vec!["when"]);
    }

    #[test]
    fn test_config_from_json_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"analysis": {{"iqr_multiplier": 3.0}}}}"#).unwrap();

        let config = SheetLensConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.analysis.iqr_multiplier, 3.0);
        assert_eq!(config.analysis.normality_alpha, 0.05);
        assert!(config.parser.has_header);
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = SheetLensConfig::from_json_file(file.path());
        assert!(matches!(result, Err(SheetLensError::Config(_))));
    }
}
