//! In-memory tabular dataset.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetLensError};

use super::types::{Cell, ColumnKind};

/// A named column of typed cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Build a numeric column; `None` entries become missing cells.
    pub fn numeric(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.map(Cell::number).unwrap_or(Cell::Missing))
            .collect();
        Self::new(name, cells)
    }

    /// Build a text column from raw strings, typing each value.
    pub fn from_raw(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| Cell::from_raw(v)).collect())
    }

    pub fn kind(&self) -> ColumnKind {
        ColumnKind::of(&self.cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Row-aligned numeric view: `None` for every non-numeric cell.
    pub fn numbers(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::as_number).collect()
    }

    /// Non-missing numeric values in row order.
    pub fn present_numbers(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_number).collect()
    }
}

/// Row-aligned table of named columns.
///
/// Columns keep their source order and always have equal length. Tables
/// loaded from a file also keep each row's text exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_rows: Option<Vec<Vec<String>>>,
}

impl Table {
    /// Create a table, rejecting columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(SheetLensError::Shape(format!(
                    "column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    expected
                )));
            }
        }
        Ok(Self {
            columns,
            raw_rows: None,
        })
    }

    /// Build a table from row-major cells, padding short rows with missing
    /// cells and truncating long ones.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut().take(width) {
                column.cells.push(cells.next().unwrap_or(Cell::Missing));
            }
        }

        Self {
            columns,
            raw_rows: None,
        }
    }

    /// Attach the source text of each row, shaped like the typed cells.
    pub fn with_raw_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        let width = self.column_count();
        let shaped = rows
            .into_iter()
            .take(self.row_count())
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        self.raw_rows = Some(shaped);
        self
    }

    /// Source text of each row, when the table was loaded from a file.
    pub fn raw_rows(&self) -> Option<&[Vec<String>]> {
        self.raw_rows.as_deref()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.columns.get(col).and_then(|c| c.cells.get(row))
    }

    /// Columns whose kind is numeric, in source order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.kind().is_numeric())
            .collect()
    }

    pub fn text_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Text)
            .count()
    }

    /// Total number of missing cells across the table.
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Iterate rows as cell slices gathered across columns.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count()).map(move |r| self.columns.iter().map(|c| &c.cells[r]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::numeric("a", &[Some(1.0), Some(2.0)]),
            Column::numeric("b", &[Some(1.0)]),
        ]);
        assert!(matches!(result, Err(SheetLensError::Shape(_))));
    }

    #[test]
    fn test_from_rows_pads_and_truncates() {
        let table = Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Cell::Number(1.0)],
                vec![Cell::Number(2.0), Cell::text("x"), Cell::text("extra")],
            ],
        );

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some(&Cell::Missing));
        assert_eq!(table.get(1, 1), Some(&Cell::text("x")));
    }

    #[test]
    fn test_raw_rows_follow_table_shape() {
        let table = Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Cell::Number(7.0)], vec![Cell::Number(1.0), Cell::Missing]],
        )
        .with_raw_rows(vec![
            vec!["007".to_string()],
            vec!["1.0".to_string(), "NA".to_string(), "extra".to_string()],
            vec!["dropped".to_string()],
        ]);

        let raw = table.raw_rows().unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0], vec!["007", ""]);
        assert_eq!(raw[1], vec!["1.0", "NA"]);
        assert!(Table::default().raw_rows().is_none());
    }

    #[test]
    fn test_column_counts() {
        let table = Table::new(vec![
            Column::numeric("sales", &[Some(1.0), None, Some(3.0)]),
            Column::from_raw("region", &["N", "S", ""]),
            Column::numeric("cost", &[None, None, None]),
        ])
        .unwrap();

        assert_eq!(table.numeric_columns().len(), 1);
        assert_eq!(table.text_column_count(), 1);
        assert_eq!(table.missing_count(), 5);
    }
}
