//! Flattening a report into named sheets and writing them to disk.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::analysis::Category;
use crate::data::{ResultTable, Table};
use crate::error::{Result, SheetLensError};

use super::Report;

/// Longest sheet name a workbook accepts.
const MAX_SHEET_NAME: usize = 31;

/// Name of the sheet holding the untouched source table.
pub const SOURCE_SHEET: &str = "source_data";

/// File name of the JSON rendition of a report.
const REPORT_FILE: &str = "report.json";

/// A rectangular block of text cells with a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn from_result(name: String, data: &ResultTable) -> Self {
        let header = std::iter::once(String::new())
            .chain(data.columns.iter().cloned())
            .collect();
        let rows = data
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.label.clone())
                    .chain(row.cells.iter().map(ToString::to_string))
                    .collect()
            })
            .collect();
        Self { name, header, rows }
    }

    /// Loaded tables keep their source text; built ones render their cells.
    fn from_table(table: &Table) -> Self {
        let rows = match table.raw_rows() {
            Some(raw) => raw.to_vec(),
            None => table
                .rows()
                .map(|row| row.into_iter().map(ToString::to_string).collect())
                .collect(),
        };
        Self {
            name: SOURCE_SHEET.to_string(),
            header: table.column_names().into_iter().map(String::from).collect(),
            rows,
        }
    }

    /// Write the sheet as CSV.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| SheetLensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}

/// `{category}_{analysis}` cut to the workbook limit.
pub fn sheet_name(category: Category, analysis: &str) -> String {
    format!("{}_{}", category.label(), analysis)
        .chars()
        .take(MAX_SHEET_NAME)
        .collect()
}

/// One sheet per analysis in report order, then the source table.
pub fn sheets(report: &Report, source: &Table) -> Vec<Sheet> {
    let mut out: Vec<Sheet> = report
        .categories
        .iter()
        .flat_map(|(category, entries)| {
            entries
                .iter()
                .map(move |(name, entry)| Sheet::from_result(sheet_name(*category, name), &entry.data))
        })
        .collect();
    out.push(Sheet::from_table(source));
    out
}

/// First sheet whose name contains `query`, else the first sheet.
pub fn select_sheet<'a>(sheets: &'a [Sheet], query: &str) -> Option<&'a Sheet> {
    sheets
        .iter()
        .find(|s| s.name.contains(query))
        .or_else(|| sheets.first())
}

/// Write every sheet as `<name>.csv` plus `report.json` into `dir`.
///
/// Returns the written paths, JSON last.
pub fn export(report: &Report, source: &Table, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            SheetLensError::Persistence(format!(
                "Failed to create directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut written = Vec::new();
    for sheet in sheets(report, source) {
        let path = dir.join(format!("{}.csv", sheet.name));
        sheet.write_csv(&path)?;
        debug!(path = %path.display(), rows = sheet.rows.len(), "wrote sheet");
        written.push(path);
    }

    let json_path = dir.join(REPORT_FILE);
    let file = File::create(&json_path).map_err(|e| {
        SheetLensError::Persistence(format!(
            "Failed to create file '{}': {}",
            json_path.display(),
            e
        ))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(|e| SheetLensError::Persistence(format!("Failed to serialize report: {}", e)))?;
    written.push(json_path);

    Ok(written)
}
