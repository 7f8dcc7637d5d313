//! Normality testing and IQR outlier analysis.

use tracing::{debug, warn};

use crate::data::{Cell, ResultTable, Table};
use crate::stats::{IqrBounds, NormalityError, ShapiroWilk, round_to};

use super::labels::{
    ERROR, LOWER_BOUND, NO, NORMAL, OUTLIER_COUNT, OUTLIER_PERCENT, P_VALUE, STATISTIC,
    UPPER_BOUND, YES,
};
use super::{AnalysisConfig, AnalysisKind, Analyzer, Category, Computed};

/// Computes the statistical category.
#[derive(Debug, Clone)]
pub struct StatisticalAnalyzer {
    /// Minimum non-null values for a normality test.
    min_samples: usize,
    /// Significance level for the normal/non-normal verdict.
    alpha: f64,
    /// Outlier fence multiplier.
    iqr_multiplier: f64,
}

impl StatisticalAnalyzer {
    /// Create a statistical analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(&AnalysisConfig::default())
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self {
            min_samples: config.min_normality_samples,
            alpha: config.normality_alpha,
            iqr_multiplier: config.iqr_multiplier,
        }
    }

    /// Shapiro-Wilk per numeric column.
    ///
    /// Columns without enough values, or where the test cannot run, get an
    /// error marker instead of numbers.
    pub fn normality_test(&self, table: &Table) -> Option<ResultTable> {
        let numeric = table.numeric_columns();
        if numeric.is_empty() {
            debug!("no numeric columns, skipping normality test");
            return None;
        }

        let mut result = ResultTable::new([STATISTIC, P_VALUE, NORMAL, ERROR]);
        for column in numeric {
            let values = column.present_numbers();
            let outcome = if values.len() < self.min_samples {
                Err(NormalityError::TooFewSamples(values.len()))
            } else {
                ShapiroWilk::test(&values)
            };

            let cells = match outcome {
                Ok(test) => vec![
                    Cell::number(round_to(test.statistic, 4)),
                    Cell::number(round_to(test.p_value, 4)),
                    Cell::text(if test.is_normal(self.alpha) { YES } else { NO }),
                    Cell::Missing,
                ],
                Err(e) => {
                    warn!(column = %column.name, error = %e, "normality test not computed");
                    vec![Cell::Missing, Cell::Missing, Cell::Missing, Cell::text(e.to_string())]
                }
            };
            result.push_row(column.name.clone(), cells);
        }
        Some(result)
    }

    /// Values strictly outside the Tukey fences, per numeric column.
    ///
    /// The percentage is relative to the column length, nulls included.
    pub fn outlier_analysis(&self, table: &Table) -> Option<ResultTable> {
        let numeric = table.numeric_columns();
        if numeric.is_empty() {
            debug!("no numeric columns, skipping outlier analysis");
            return None;
        }

        let mut result =
            ResultTable::new([OUTLIER_COUNT, OUTLIER_PERCENT, LOWER_BOUND, UPPER_BOUND]);
        for column in numeric {
            let values = column.present_numbers();
            let Some(bounds) = IqrBounds::from_values(&values, self.iqr_multiplier) else {
                continue;
            };

            let count = values.iter().filter(|v| bounds.is_outlier(**v)).count();
            let percent = count as f64 / column.len() as f64 * 100.0;

            result.push_row(
                column.name.clone(),
                vec![
                    Cell::Number(count as f64),
                    Cell::number(round_to(percent, 2)),
                    Cell::number(round_to(bounds.lower, 2)),
                    Cell::number(round_to(bounds.upper, 2)),
                ],
            );
        }
        Some(result)
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StatisticalAnalyzer {
    fn category(&self) -> Category {
        Category::Statistical
    }

    fn analyze(&self, table: &Table) -> Vec<Computed> {
        let mut out = Vec::new();
        if let Some(data) = self.normality_test(table) {
            out.push(Computed::new(AnalysisKind::NormalityTest, data));
        }
        if let Some(data) = self.outlier_analysis(table) {
            out.push(Computed::new(AnalysisKind::OutlierAnalysis, data));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;

    fn table(values: &[Option<f64>]) -> Table {
        Table::new(vec![Column::numeric("amount", values)]).unwrap()
    }

    #[test]
    fn test_outlier_bounds_and_percentage() {
        let t = table(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(100.0)]);
        let result = StatisticalAnalyzer::new().outlier_analysis(&t).unwrap();

        assert_eq!(result.number("amount", OUTLIER_COUNT), Some(1.0));
        assert_eq!(result.number("amount", OUTLIER_PERCENT), Some(16.67));
        assert_eq!(result.number("amount", LOWER_BOUND), Some(-1.5));
        assert_eq!(result.number("amount", UPPER_BOUND), Some(8.5));
    }

    #[test]
    fn test_outlier_percentage_counts_nulls_in_denominator() {
        let t = table(&[Some(1.0), Some(2.0), Some(3.0), Some(100.0), None]);
        let result = StatisticalAnalyzer::new().outlier_analysis(&t).unwrap();
        assert_eq!(result.number("amount", OUTLIER_PERCENT), Some(20.0));
    }

    #[test]
    fn test_normality_marks_short_columns() {
        let t = table(&[Some(1.0), Some(2.0), Some(3.0), None]);
        let result = StatisticalAnalyzer::new().normality_test(&t).unwrap();

        assert_eq!(result.get("amount", STATISTIC), Some(&Cell::Missing));
        let marker = result.get("amount", ERROR).and_then(Cell::as_text).unwrap();
        assert!(marker.contains("insufficient data"));
    }

    #[test]
    fn test_normality_verdict() {
        let t = table(&[
            Some(-1.8),
            Some(-1.2),
            Some(-0.9),
            Some(-0.6),
            Some(-0.4),
            Some(-0.2),
            Some(0.0),
            Some(0.1),
            Some(0.3),
            Some(0.5),
            Some(0.7),
            Some(1.0),
            Some(1.3),
            Some(1.9),
        ]);
        let result = StatisticalAnalyzer::new().normality_test(&t).unwrap();
        assert_eq!(result.get("amount", NORMAL), Some(&Cell::text(YES)));
        assert!(result.number("amount", P_VALUE).unwrap() > 0.05);
    }
}
