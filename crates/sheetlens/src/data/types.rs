//! Cell and column type definitions.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tokens treated as a missing value when typing raw text.
const NULL_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "nil"];

/// A single typed value in a table.
///
/// Serialized as `{"type": ..., "value": ...}` so every variant reads back
/// as itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value.
    Missing,
    /// A finite number.
    Number(f64),
    /// A calendar date or timestamp.
    Date(NaiveDateTime),
    /// Free text.
    Text(String),
}

impl Cell {
    /// Type a raw text value.
    ///
    /// Null-like tokens become [`Cell::Missing`], finite numbers become
    /// [`Cell::Number`], and everything else is kept as text. Date-looking
    /// text stays text; date interpretation happens during detection.
    pub fn from_raw(value: &str) -> Self {
        let trimmed = value.trim();

        if Self::is_null_token(trimmed) {
            return Cell::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    /// Check if a raw value represents a missing/null value.
    pub fn is_null_token(value: &str) -> bool {
        let trimmed = value.trim();
        NULL_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
    }

    /// Build a numeric cell, mapping non-finite values to missing.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Cell::Number(value)
        } else {
            Cell::Missing
        }
    }

    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric value, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Storage kind of a whole column, derived from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-missing cell is a number.
    Numeric,
    /// At least one cell is text.
    Text,
    /// No text cells and at least one date cell.
    Date,
    /// Every cell is missing.
    Empty,
}

impl ColumnKind {
    /// Classify a column from its cells.
    pub fn of(cells: &[Cell]) -> Self {
        let mut has_number = false;
        let mut has_date = false;

        for cell in cells {
            match cell {
                Cell::Text(_) => return ColumnKind::Text,
                Cell::Number(_) => has_number = true,
                Cell::Date(_) => has_date = true,
                Cell::Missing => {}
            }
        }

        match (has_number, has_date) {
            // Numbers mixed with dates behave like an untyped object column.
            (true, true) => ColumnKind::Text,
            (true, false) => ColumnKind::Numeric,
            (false, true) => ColumnKind::Date,
            (false, false) => ColumnKind::Empty,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}
