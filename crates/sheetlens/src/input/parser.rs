//! Table loading: delimited text with delimiter detection, and workbooks.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::data::{Cell, Table};
use crate::error::{Result, SheetLensError};

use super::source::{SourceFormat, SourceMetadata};
use super::workbook;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads tabular data files into typed tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    ///
    /// The format is chosen by extension; anything other than delimited text
    /// or a workbook is rejected.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let format = SourceFormat::from_path(path).ok_or_else(|| {
            SheetLensError::UnsupportedFormat(format!(
                "'{}' is not a delimited text file or spreadsheet workbook",
                path.display()
            ))
        })?;

        let mut file = File::open(path).map_err(|e| SheetLensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SheetLensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, format_name) = match format {
            SourceFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                (self.parse_bytes(&contents, delimiter)?, delimiter_name(delimiter))
            }
            SourceFormat::Workbook => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("xlsx")
                    .to_ascii_lowercase();
                let table =
                    workbook::read_first_sheet(contents, self.config.has_header, self.config.max_rows)?;
                (table, ext)
            }
        };

        debug!(
            path = %path.display(),
            format = %format_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed file"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source_metadata))
    }

    /// Parse delimited bytes into a typed table.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let (headers, first_row) = if self.config.has_header {
            let headers: Vec<String> = reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect();
            (headers, None)
        } else {
            match reader.records().next() {
                Some(Ok(record)) => {
                    let headers = (0..record.len())
                        .map(|i| format!("column_{}", i + 1))
                        .collect();
                    (headers, Some(record))
                }
                Some(Err(e)) => return Err(e.into()),
                None => return Err(SheetLensError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(SheetLensError::EmptyData("No columns found".to_string()));
        }

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let mut raw: Vec<Vec<String>> = Vec::new();

        if let Some(record) = first_row {
            raw.push(record.iter().map(String::from).collect());
        }

        for result in reader.records() {
            if raw.len() >= limit {
                break;
            }
            let record = result?;
            raw.push(record.iter().map(String::from).collect());
        }
        raw.truncate(limit);

        if raw.is_empty() {
            return Err(SheetLensError::EmptyData("No data rows found".to_string()));
        }

        let rows: Vec<Vec<Cell>> = raw
            .iter()
            .map(|row| row.iter().map(|v| Cell::from_raw(v)).collect())
            .collect();

        Ok(Table::from_rows(headers, rows).with_raw_rows(raw))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn delimiter_name(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SheetLensError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Consistent counts win; tabs get a small bonus since they rarely
        // appear inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnKind;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon_with_quoted_commas() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";fine";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv_types_cells() {
        let parser = Parser::new();
        let data = b"name,age,joined\nAlice,30,2024-01-05\nBob,NA,2024-02-10";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "joined"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Cell::text("Alice")));
        assert_eq!(table.get(0, 1), Some(&Cell::Number(30.0)));
        assert_eq!(table.get(1, 1), Some(&Cell::Missing));
        assert_eq!(table.column("age").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(table.column("joined").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b,c\n1,2\n4,5,6,7", b',').unwrap();
        assert_eq!(table.get(0, 2), Some(&Cell::Missing));
        assert_eq!(table.get(1, 2), Some(&Cell::Number(6.0)));
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..Default::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4", b',').unwrap();
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_keeps_source_text() {
        let table = Parser::new()
            .parse_bytes(b"code,label,qty\n007, padded ,1\n1e3,None,2", b',')
            .unwrap();

        assert_eq!(table.get(0, 0), Some(&Cell::Number(7.0)));
        assert_eq!(table.get(1, 1), Some(&Cell::Missing));
        assert_eq!(
            table.raw_rows().unwrap(),
            &[
                vec!["007".to_string(), " padded ".to_string(), "1".to_string()],
                vec!["1e3".to_string(), "None".to_string(), "2".to_string()],
            ]
        );
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = Parser::new().parse_bytes(b"a,b\n", b',');
        assert!(matches!(result, Err(SheetLensError::EmptyData(_))));
    }
}
