//! Monthly, quarterly and yearly means keyed on the first date column.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{Cell, Column, ResultTable, Table};
use crate::inference::{DateColumnDetector, coerce_datetime};
use crate::stats::round_to;

use super::labels::ERROR;
use super::{AnalysisKind, Analyzer, Category, Computed};

/// Names reserved for derived period columns.
const PERIOD_COLUMNS: [&str; 3] = ["month", "quarter", "year"];

/// Calendar period used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Month, Period::Quarter, Period::Year];

    /// Grouping key: month 1-12, quarter 1-4, or calendar year.
    pub fn key(&self, dt: &NaiveDateTime) -> i32 {
        match self {
            Period::Month => dt.month() as i32,
            Period::Quarter => ((dt.month() - 1) / 3 + 1) as i32,
            Period::Year => dt.year(),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            Period::Month => AnalysisKind::Monthly,
            Period::Quarter => AnalysisKind::Quarterly,
            Period::Year => AnalysisKind::Yearly,
        }
    }
}

/// Failure while building period aggregates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeSeriesError {
    #[error("value '{value}' in column '{column}' (row {row}) is not a date")]
    UnparseableDate {
        column: String,
        row: usize,
        value: String,
    },
}

/// Computes the time category.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesAnalyzer;

impl TimeSeriesAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Per-period means of every numeric column, one table per period.
    ///
    /// Skipped without a date column or without numeric columns. Parse
    /// failures produce a single error table instead.
    pub fn period_analyses(&self, table: &Table) -> Vec<Computed> {
        let date_columns = DateColumnDetector::detect(table);
        let Some(date_name) = date_columns.first() else {
            debug!("no date columns, skipping time-series analysis");
            return Vec::new();
        };

        let numeric: Vec<&Column> = table
            .numeric_columns()
            .into_iter()
            .filter(|c| &c.name != date_name && !PERIOD_COLUMNS.contains(&c.name.as_str()))
            .collect();
        if numeric.is_empty() {
            debug!(date_column = %date_name, "no numeric columns to aggregate");
            return Vec::new();
        }

        let Some(date_column) = table.column(date_name) else {
            return Vec::new();
        };

        match self.period_means(date_column, &numeric) {
            Ok(computed) => computed,
            Err(e) => {
                warn!(error = %e, "time-series analysis failed");
                vec![Computed::new(
                    AnalysisKind::TimeSeriesError,
                    ResultTable::new([ERROR]).with_row(
                        "0",
                        vec![Cell::text(format!("time-series analysis failed: {}", e))],
                    ),
                )]
            }
        }
    }

    fn period_means(
        &self,
        date_column: &Column,
        numeric: &[&Column],
    ) -> Result<Vec<Computed>, TimeSeriesError> {
        let dates = parse_strict(date_column)?;

        Ok(Period::ALL
            .iter()
            .map(|period| Computed::new(period.kind(), group_means(*period, &dates, numeric)))
            .collect())
    }
}

/// Parse every non-missing cell; any unparseable value aborts.
fn parse_strict(column: &Column) -> Result<Vec<Option<NaiveDateTime>>, TimeSeriesError> {
    column
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            if cell.is_missing() {
                return Ok(None);
            }
            coerce_datetime(cell)
                .map(Some)
                .ok_or_else(|| TimeSeriesError::UnparseableDate {
                    column: column.name.clone(),
                    row,
                    value: cell.to_string(),
                })
        })
        .collect()
}

/// Mean of each column per period key, keys ascending. Rows without a date
/// are dropped.
fn group_means(period: Period, dates: &[Option<NaiveDateTime>], numeric: &[&Column]) -> ResultTable {
    // key -> per-column (sum, count)
    let mut groups: BTreeMap<i32, Vec<(f64, usize)>> = BTreeMap::new();

    for (row, date) in dates.iter().enumerate() {
        let Some(date) = date else { continue };
        let acc = groups
            .entry(period.key(date))
            .or_insert_with(|| vec![(0.0, 0); numeric.len()]);
        for (slot, column) in acc.iter_mut().zip(numeric) {
            if let Some(v) = column.cells[row].as_number() {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    let mut result = ResultTable::new(numeric.iter().map(|c| c.name.clone()));
    for (key, acc) in groups {
        let cells = acc
            .into_iter()
            .map(|(sum, count)| {
                if count == 0 {
                    Cell::Missing
                } else {
                    Cell::number(round_to(sum / count as f64, 2))
                }
            })
            .collect();
        result.push_row(key.to_string(), cells);
    }
    result
}

impl Analyzer for TimeSeriesAnalyzer {
    fn category(&self) -> Category {
        Category::Time
    }

    fn analyze(&self, table: &Table) -> Vec<Computed> {
        self.period_analyses(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(computed: &[Computed]) -> Vec<AnalysisKind> {
        computed.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_monthly_quarterly_yearly_means() {
        let table = Table::new(vec![
            Column::from_raw("date", &["2023-01-05", "2023-01-20", "2023-04-02", "2024-04-10"]),
            Column::numeric("sales", &[Some(10.0), Some(20.0), Some(30.0), Some(50.0)]),
        ])
        .unwrap();

        let computed = TimeSeriesAnalyzer::new().period_analyses(&table);
        assert_eq!(
            kinds(&computed),
            vec![AnalysisKind::Monthly, AnalysisKind::Quarterly, AnalysisKind::Yearly]
        );

        let monthly = &computed[0].data;
        assert_eq!(monthly.row_count(), 2);
        assert_eq!(monthly.number("1", "sales"), Some(15.0));
        assert_eq!(monthly.number("4", "sales"), Some(40.0));

        let yearly = &computed[2].data;
        assert_eq!(yearly.number("2023", "sales"), Some(20.0));
        assert_eq!(yearly.number("2024", "sales"), Some(50.0));
    }

    #[test]
    fn test_unparseable_date_yields_error_table() {
        let table = Table::new(vec![
            Column::from_raw("date", &["2023-01-05", "someday"]),
            Column::numeric("sales", &[Some(1.0), Some(2.0)]),
        ])
        .unwrap();

        let computed = TimeSeriesAnalyzer::new().period_analyses(&table);
        assert_eq!(kinds(&computed), vec![AnalysisKind::TimeSeriesError]);
        let message = computed[0].data.get("0", ERROR).and_then(Cell::as_text).unwrap();
        assert!(message.contains("someday"));
    }

    #[test]
    fn test_skips_without_dates_or_numbers() {
        let no_dates = Table::new(vec![Column::numeric("sales", &[Some(1.0)])]).unwrap();
        assert!(TimeSeriesAnalyzer::new().period_analyses(&no_dates).is_empty());

        let no_numbers = Table::new(vec![
            Column::from_raw("date", &["2023-01-05"]),
            Column::numeric("month", &[Some(1.0)]),
        ])
        .unwrap();
        assert!(TimeSeriesAnalyzer::new().period_analyses(&no_numbers).is_empty());
    }

    #[test]
    fn test_quarter_key() {
        let dt = |m| {
            chrono::NaiveDate::from_ymd_opt(2024, m, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        assert_eq!(Period::Quarter.key(&dt(1)), 1);
        assert_eq!(Period::Quarter.key(&dt(3)), 1);
        assert_eq!(Period::Quarter.key(&dt(4)), 2);
        assert_eq!(Period::Quarter.key(&dt(12)), 4);
    }
}
