//! Descriptive statistics, missing-data profile, dataset overview and
//! correlation matrix.

use tracing::debug;

use crate::data::{Cell, ResultTable, Table};
use crate::stats::{Summary, pearson, round_to};

use super::labels::{MISSING_COUNT, MISSING_PERCENT, VALUE};
use super::{AnalysisKind, Analyzer, Category, Computed};

const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Computes the basic category.
#[derive(Debug, Clone, Default)]
pub struct BasicAnalyzer;

impl BasicAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Per numeric column: count, mean, std, min, quartiles, max.
    ///
    /// Statistics are rows and numeric columns are columns. `None` without
    /// numeric columns.
    pub fn describe(&self, table: &Table) -> Option<ResultTable> {
        let numeric = table.numeric_columns();
        if numeric.is_empty() {
            debug!("no numeric columns, skipping descriptive statistics");
            return None;
        }

        let summaries: Vec<Option<Summary>> = numeric
            .iter()
            .map(|c| Summary::from_values(&c.present_numbers()))
            .collect();

        let mut result = ResultTable::new(numeric.iter().map(|c| c.name.clone()));
        for (row, label) in DESCRIBE_ROWS.iter().enumerate() {
            let cells = summaries
                .iter()
                .map(|s| match s {
                    Some(s) => describe_cell(s, row),
                    None => Cell::Missing,
                })
                .collect();
            result.push_row(*label, cells);
        }
        Some(result)
    }

    /// Missing count and percentage for columns with at least one gap.
    pub fn missing_profile(&self, table: &Table) -> Option<ResultTable> {
        let rows = table.row_count();
        let mut result = ResultTable::new([MISSING_COUNT, MISSING_PERCENT]);

        for column in table.columns() {
            let missing = column.missing_count();
            if missing == 0 {
                continue;
            }
            let percent = round_to(missing as f64 / rows as f64 * 100.0, 2);
            result.push_row(
                column.name.clone(),
                vec![Cell::Number(missing as f64), Cell::number(percent)],
            );
        }

        if result.is_empty() {
            debug!("no missing values, skipping missing-data profile");
            return None;
        }
        Some(result)
    }

    /// Fixed five-row overview of the dataset.
    pub fn general_info(&self, table: &Table) -> ResultTable {
        let facts = [
            ("row_count", table.row_count()),
            ("column_count", table.column_count()),
            ("missing_cells", table.missing_count()),
            ("numeric_columns", table.numeric_columns().len()),
            ("text_columns", table.text_column_count()),
        ];

        facts.iter().fold(ResultTable::new([VALUE]), |t, (label, n)| {
            t.with_row(*label, vec![Cell::Number(*n as f64)])
        })
    }

    /// Pearson matrix over numeric columns, rounded to 3 decimals.
    ///
    /// Requires at least two numeric columns.
    pub fn correlation(&self, table: &Table) -> Option<ResultTable> {
        let numeric = table.numeric_columns();
        if numeric.len() < 2 {
            debug!(numeric = numeric.len(), "skipping correlation matrix");
            return None;
        }

        let series: Vec<Vec<Option<f64>>> = numeric.iter().map(|c| c.numbers()).collect();
        let k = series.len();
        let mut matrix = vec![vec![Cell::Missing; k]; k];

        for i in 0..k {
            for j in i..k {
                let cell = pearson(&series[i], &series[j])
                    .map(|r| Cell::number(round_to(r, 3)))
                    .unwrap_or(Cell::Missing);
                matrix[j][i] = cell.clone();
                matrix[i][j] = cell;
            }
        }

        let mut result = ResultTable::new(numeric.iter().map(|c| c.name.clone()));
        for (column, row) in numeric.iter().zip(matrix) {
            result.push_row(column.name.clone(), row);
        }
        Some(result)
    }
}

fn describe_cell(summary: &Summary, row: usize) -> Cell {
    let value = match row {
        0 => Some(summary.count as f64),
        1 => Some(summary.mean),
        2 => summary.std,
        3 => Some(summary.min),
        4 => Some(summary.q1),
        5 => Some(summary.median),
        6 => Some(summary.q3),
        _ => Some(summary.max),
    };
    value
        .map(|v| Cell::number(round_to(v, 2)))
        .unwrap_or(Cell::Missing)
}

impl Analyzer for BasicAnalyzer {
    fn category(&self) -> Category {
        Category::Basic
    }

    fn analyze(&self, table: &Table) -> Vec<Computed> {
        let mut out = Vec::new();
        if let Some(data) = self.describe(table) {
            out.push(Computed::new(AnalysisKind::DescriptiveStatistics, data));
        }
        if let Some(data) = self.missing_profile(table) {
            out.push(Computed::new(AnalysisKind::MissingData, data));
        }
        out.push(Computed::new(
            AnalysisKind::GeneralInfo,
            self.general_info(table),
        ));
        if let Some(data) = self.correlation(table) {
            out.push(Computed::new(AnalysisKind::CorrelationMatrix, data));
        }
        out
    }
}
