//! Labeled result matrices produced by the analyzers.

use serde::{Deserialize, Serialize};

use super::types::Cell;

/// One labeled row of a [`ResultTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// A matrix keyed by row label and column label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Column labels.
    pub columns: Vec<String>,
    /// Rows in insertion order.
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Create an empty table with the given column labels.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with missing cells.
    pub fn push_row(&mut self, label: impl Into<String>, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Missing);
        self.rows.push(ResultRow {
            label: label.into(),
            cells,
        });
    }

    /// Builder form of [`ResultTable::push_row`].
    pub fn with_row(mut self, label: impl Into<String>, cells: Vec<Cell>) -> Self {
        self.push_row(label, cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Get the cell at (row label, column label).
    pub fn get(&self, row: &str, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.label == row)
            .and_then(|r| r.cells.get(col))
    }

    /// Numeric value at (row label, column label).
    pub fn number(&self, row: &str, column: &str) -> Option<f64> {
        self.get(row, column).and_then(Cell::as_number)
    }

    /// Iterate `(row label, cell)` pairs of one column.
    pub fn column_cells<'a>(&'a self, column: &str) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        let col = self.column_index(column);
        self.rows.iter().filter_map(move |r| {
            let cell = r.cells.get(col?)?;
            Some((r.label.as_str(), cell))
        })
    }

    /// Label of the first row holding the largest number in `column`.
    pub fn argmax(&self, column: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, cell) in self.column_cells(column) {
            if let Some(value) = cell.as_number() {
                if best.is_none_or(|(_, b)| value > b) {
                    best = Some((label, value));
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        ResultTable::new(["count", "percent"])
            .with_row("a", vec![Cell::Number(2.0), Cell::Number(20.0)])
            .with_row("b", vec![Cell::Number(5.0), Cell::Number(50.0)])
            .with_row("c", vec![Cell::Number(5.0)])
    }

    #[test]
    fn test_lookup() {
        let table = sample();
        assert_eq!(table.number("b", "percent"), Some(50.0));
        assert_eq!(table.get("c", "percent"), Some(&Cell::Missing));
        assert_eq!(table.get("z", "percent"), None);
        assert_eq!(table.get("a", "nope"), None);
    }

    #[test]
    fn test_argmax_keeps_first_maximum() {
        let table = sample();
        assert_eq!(table.argmax("count"), Some(("b", 5.0)));
    }
}
