//! Reading the first worksheet of a spreadsheet workbook.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::data::{Cell, Table};
use crate::error::{Result, SheetLensError};
use crate::inference::parse_datetime;

/// Load the first worksheet. The first row is the header unless
/// `has_header` is false.
pub(crate) fn read_first_sheet(
    bytes: Vec<u8>,
    has_header: bool,
    max_rows: Option<usize>,
) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetLensError::EmptyData("Workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let width = range.width();
    if width == 0 {
        return Err(SheetLensError::EmptyData("No columns found".to_string()));
    }

    let headers: Vec<String> = if has_header {
        let Some(first) = rows.next() else {
            return Err(SheetLensError::EmptyData("No data rows found".to_string()));
        };
        first
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(cell, i))
            .collect()
    } else {
        (0..width).map(|i| format!("column_{}", i + 1)).collect()
    };

    let limit = max_rows.unwrap_or(usize::MAX);
    let (data, raw): (Vec<Vec<Cell>>, Vec<Vec<String>>) = rows
        .take(limit)
        .map(|row| {
            let cells: Vec<Cell> = row.iter().map(to_cell).collect();
            let text = row
                .iter()
                .zip(&cells)
                .map(|(value, cell)| source_text(value, cell))
                .collect();
            (cells, text)
        })
        .unzip();

    if data.is_empty() {
        return Err(SheetLensError::EmptyData("No data rows found".to_string()));
    }

    debug!(rows = data.len(), columns = headers.len(), "read worksheet");
    Ok(Table::from_rows(headers, data).with_raw_rows(raw))
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("column_{}", index + 1),
        other => other.to_string().trim().to_string(),
    }
}

/// Text of a workbook cell as stored. Dates have no stored text and use
/// their typed rendering.
fn source_text(data: &Data, cell: &Cell) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(_) => cell.to_string(),
        other => other.to_string(),
    }
}

/// Type a workbook cell.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::String(s) => Cell::from_raw(s),
        Data::Bool(b) => Cell::text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::text(s.clone())),
        Data::DurationIso(s) => Cell::text(s.clone()),
    }
}
