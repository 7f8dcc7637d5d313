//! Date column detection and coerce-or-null date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::{Cell, Column, Table};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Cheap shape check run before trying every chrono format.

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}            # 2024-01-15, 01/15/2024, 15.01.2024
        | ^\d{1,2}\s+[A-Za-z]{3,9}\.?,?\s+\d{4}     # 15 Jan 2024
        | ^[A-Za-z]{3,9}\.?\s+\d{1,2},?\s+\d{4}     # Jan 15, 2024
        ",
    )
    .unwrap()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// Parse a text value as a timestamp. Unparseable input yields `None`.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !DATE_SHAPE.is_match(trimmed) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Interpret a cell as a timestamp: date cells pass through, text is parsed,
/// numbers and missing cells are null.
pub fn coerce_datetime(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Date(dt) => Some(*dt),
        Cell::Text(s) => parse_datetime(s),
        Cell::Number(_) | Cell::Missing => None,
    }
}

/// Finds columns that can be read as calendar dates.
pub struct DateColumnDetector;

impl DateColumnDetector {
    /// Names of columns where at least one cell parses as a date, in source
    /// order.
    pub fn detect(table: &Table) -> Vec<String> {
        table
            .columns()
            .iter()
            .filter(|c| Self::is_date_column(c))
            .map(|c| c.name.clone())
            .collect()
    }

    /// A column qualifies unless every cell coerces to null.
    pub fn is_date_column(column: &Column) -> bool {
        column.cells.iter().any(|c| coerce_datetime(c).is_some())
    }
}
