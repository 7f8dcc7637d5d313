//! Profitability share and first-to-last growth.

use tracing::debug;

use crate::data::{Cell, ResultTable, Table};
use crate::stats::{mean, round_to};

use super::labels::{ERROR, GROWTH_PERCENT, MEAN, SHARE_PERCENT, TOTAL};
use super::{AnalysisKind, Analyzer, Category, Computed};

/// Computes the business category.
#[derive(Debug, Clone, Default)]
pub struct BusinessAnalyzer;

impl BusinessAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Sum, mean and share of the grand total for positive-summed columns.
    ///
    /// The grand total covers only the qualifying columns, so shares add up
    /// to 100. `None` when no column has a positive sum.
    pub fn profitability(&self, table: &Table) -> Option<ResultTable> {
        let qualifying: Vec<(String, f64, f64)> = table
            .numeric_columns()
            .into_iter()
            .filter_map(|column| {
                let values = column.present_numbers();
                let total: f64 = values.iter().sum();
                (total > 0.0).then(|| (column.name.clone(), total, mean(&values).unwrap_or(0.0)))
            })
            .collect();

        if qualifying.is_empty() {
            debug!("no positive-summed numeric columns, skipping profitability");
            return None;
        }

        let grand_total: f64 = qualifying.iter().map(|(_, total, _)| total).sum();
        let mut result = ResultTable::new([TOTAL, MEAN, SHARE_PERCENT]);
        for (name, total, avg) in qualifying {
            result.push_row(
                name,
                vec![
                    Cell::number(round_to(total, 2)),
                    Cell::number(round_to(avg, 2)),
                    Cell::number(round_to(total / grand_total * 100.0, 2)),
                ],
            );
        }
        Some(result)
    }

    /// Percentage change from the first to the last row of each numeric
    /// column: `(last - first) / |first| * 100`.
    ///
    /// A zero or missing endpoint marks the column with an error value.
    /// `None` with fewer than two rows.
    pub fn growth_rate(&self, table: &Table) -> Option<ResultTable> {
        let numeric = table.numeric_columns();
        if numeric.is_empty() || table.row_count() < 2 {
            debug!(rows = table.row_count(), "skipping growth rate");
            return None;
        }

        let mut result = ResultTable::new([GROWTH_PERCENT]);
        for column in numeric {
            let first = column.cells.first().and_then(Cell::as_number);
            let last = column.cells.last().and_then(Cell::as_number);
            result.push_row(column.name.clone(), vec![growth_cell(first, last)]);
        }
        Some(result)
    }
}

fn growth_cell(first: Option<f64>, last: Option<f64>) -> Cell {
    match (first, last) {
        (Some(first), Some(last)) if first != 0.0 => {
            let growth = (last - first) / first.abs() * 100.0;
            if growth.is_finite() {
                Cell::Number(round_to(growth, 2))
            } else {
                Cell::text(ERROR)
            }
        }
        _ => Cell::text(ERROR),
    }
}

impl Analyzer for BusinessAnalyzer {
    fn category(&self) -> Category {
        Category::Business
    }

    fn analyze(&self, table: &Table) -> Vec<Computed> {
        let mut out = Vec::new();
        if let Some(data) = self.profitability(table) {
            out.push(Computed::new(AnalysisKind::Profitability, data));
        }
        if let Some(data) = self.growth_rate(table) {
            out.push(Computed::new(AnalysisKind::GrowthRate, data));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    #[test]
    fn test_growth_rate() {
        let table = Table::new(vec![
            Column::numeric("revenue", &[Some(10.0), Some(0.0), Some(20.0)]),
            Column::numeric("loss", &[Some(-4.0), Some(1.0), Some(-2.0)]),
            Column::numeric("start_zero", &[Some(0.0), Some(5.0), Some(7.0)]),
            Column::numeric("gap", &[Some(3.0), Some(5.0), None]),
        ])
        .unwrap();

        let result = BusinessAnalyzer::new().growth_rate(&table).unwrap();
        assert_eq!(result.number("revenue", GROWTH_PERCENT), Some(100.0));
        assert_eq!(result.number("loss", GROWTH_PERCENT), Some(50.0));
        assert_eq!(result.get("start_zero", GROWTH_PERCENT), Some(&Cell::text(ERROR)));
        assert_eq!(result.get("gap", GROWTH_PERCENT), Some(&Cell::text(ERROR)));
    }

    #[test]
    fn test_growth_rate_needs_two_rows() {
        let table = Table::new(vec![Column::numeric("revenue", &[Some(10.0)])]).unwrap();
        assert!(BusinessAnalyzer::new().growth_rate(&table).is_none());
    }

    #[test]
    fn test_profitability_shares() {
        let table = Table::new(vec![
            Column::numeric("product_a", &[Some(10.0), Some(30.0)]),
            Column::numeric("product_b", &[Some(60.0), None]),
            Column::numeric("refunds", &[Some(-5.0), Some(-5.0)]),
        ])
        .unwrap();

        let result = BusinessAnalyzer::new().profitability(&table).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.number("product_a", TOTAL), Some(40.0));
        assert_eq!(result.number("product_a", MEAN), Some(20.0));
        assert_eq!(result.number("product_a", SHARE_PERCENT), Some(40.0));
        assert_eq!(result.number("product_b", SHARE_PERCENT), Some(60.0));
        assert!(result.get("refunds", TOTAL).is_none());
    }

    #[test]
    fn test_profitability_keeps_huge_totals() {
        let table = Table::new(vec![Column::numeric("revenue", &[Some(1e307), Some(1.0)])]).unwrap();

        let result = BusinessAnalyzer::new().profitability(&table).unwrap();
        assert_eq!(result.number("revenue", TOTAL), Some(1e307));
        assert_eq!(result.number("revenue", MEAN), Some(5e306));
        assert_eq!(result.number("revenue", SHARE_PERCENT), Some(100.0));
    }

    #[test]
    fn test_profitability_absent_without_positive_sums() {
        let table = Table::new(vec![Column::numeric("refunds", &[Some(-1.0)])]).unwrap();
        assert!(BusinessAnalyzer::new().profitability(&table).is_none());
    }
}
