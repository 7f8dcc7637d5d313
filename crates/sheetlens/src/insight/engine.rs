//! Rule-based insight generation from analysis results.
//!
//! Each analysis kind has a heuristic that reads its result table (and, for
//! descriptive statistics, the source table) and emits findings plus advice.
//! Kinds without a heuristic, and heuristics that find nothing to say, fall
//! back to a generic pair so neither set is ever empty.

use crate::analysis::labels::{
    MISSING_COUNT, MISSING_PERCENT, NORMAL, OUTLIER_PERCENT, SHARE_PERCENT, YES,
};
use crate::analysis::{AnalysisConfig, AnalysisKind};
use crate::data::{ResultTable, Table};
use crate::stats::Summary;

use super::Insights;

/// Insight used when no heuristic produced a finding.
pub const GENERIC_INSIGHT: &str = "Data quality looks acceptable";
/// Recommendation used when no heuristic produced advice.
pub const GENERIC_RECOMMENDATION: &str = "Continue with more advanced analysis methods";

/// Generates insights and recommendations for result tables.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    config: AnalysisConfig,
}

impl InsightEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Produce insights for one analysis.
    pub fn generate(&self, kind: AnalysisKind, data: &ResultTable, source: &Table) -> Insights {
        let mut out = Insights::new();

        match kind {
            AnalysisKind::MissingData => self.missing_data(data, &mut out),
            AnalysisKind::DescriptiveStatistics => self.descriptive(source, &mut out),
            AnalysisKind::OutlierAnalysis => self.outliers(data, &mut out),
            AnalysisKind::CorrelationMatrix => self.correlations(data, &mut out),
            AnalysisKind::NormalityTest => self.normality(data, &mut out),
            AnalysisKind::Monthly => Self::seasonality(&mut out),
            AnalysisKind::Profitability => Self::profitability(data, &mut out),
            AnalysisKind::GeneralInfo
            | AnalysisKind::Quarterly
            | AnalysisKind::Yearly
            | AnalysisKind::TimeSeriesError
            | AnalysisKind::GrowthRate => {}
        }

        if out.insights.is_empty() {
            out.insight(GENERIC_INSIGHT);
        }
        if out.recommendations.is_empty() {
            out.recommend(GENERIC_RECOMMENDATION);
        }
        out
    }

    fn missing_data(&self, data: &ResultTable, out: &mut Insights) {
        let Some((column, count)) = data.argmax(MISSING_COUNT) else {
            return;
        };
        let total: f64 = data
            .column_cells(MISSING_COUNT)
            .filter_map(|(_, c)| c.as_number())
            .sum();
        let percent = data.number(column, MISSING_PERCENT).unwrap_or(0.0);

        out.insight(format!("{} missing values in total", total));
        out.insight(format!(
            "Column '{}' has the most missing values: {} ({}%)",
            column, count, percent
        ));

        if percent > self.config.missing_drop_percent {
            out.recommend(format!(
                "Drop column '{}': more than {}% of its values are missing",
                column, self.config.missing_drop_percent
            ));
            out.recommend("Investigate why the values are missing before modelling");
        } else if percent > self.config.missing_advanced_percent {
            out.recommend("Use advanced imputation such as KNN to fill the missing values");
            out.recommend("Run a sensitivity analysis on the imputed values");
        } else {
            out.recommend("Fill the missing values with the column mean or median");
        }
    }

    fn descriptive(&self, source: &Table, out: &mut Insights) {
        for column in source.numeric_columns() {
            let Some(cov) = Summary::from_values(&column.present_numbers())
                .and_then(|s| s.coefficient_of_variation())
            else {
                continue;
            };

            out.insight(format!(
                "Column '{}': coefficient of variation {:.1}%",
                column.name, cov
            ));

            if cov > self.config.high_volatility_cov {
                out.recommend(format!(
                    "Column '{}' is highly volatile; it is a good candidate for time-series analysis",
                    column.name
                ));
            } else if cov < self.config.low_volatility_cov {
                out.recommend(format!(
                    "Column '{}' is stable; it is suitable as a steady indicator",
                    column.name
                ));
            }
        }
    }

    fn outliers(&self, data: &ResultTable, out: &mut Insights) {
        let flagged: Vec<(&str, f64)> = data
            .column_cells(OUTLIER_PERCENT)
            .filter_map(|(label, cell)| Some((label, cell.as_number()?)))
            .filter(|(_, pct)| *pct > self.config.outlier_alert_percent)
            .collect();

        if flagged.is_empty() {
            out.insight("Outlier levels are within an acceptable range");
            out.recommend("No outlier treatment is needed");
            return;
        }

        out.insight(format!(
            "{} column(s) have more than {}% outliers",
            flagged.len(),
            self.config.outlier_alert_percent
        ));
        for (column, pct) in flagged {
            out.insight(format!("Column '{}': {}% outliers", column, pct));
            out.recommend(format!(
                "Investigate the root cause of the outliers in column '{}'",
                column
            ));
            out.recommend(format!("Apply Winsorization to column '{}'", column));
        }
    }

    fn correlations(&self, data: &ResultTable, out: &mut Insights) {
        let columns = &data.columns;
        let mut strong: Vec<(&str, &str, f64)> = Vec::new();

        for (i, a) in columns.iter().enumerate() {
            for b in columns.iter().skip(i + 1) {
                if let Some(r) = data.number(a, b) {
                    if r.abs() > self.config.strong_correlation {
                        strong.push((a, b, r));
                    }
                }
            }
        }

        if strong.is_empty() {
            return;
        }

        // Strongest first; ties keep scan order.
        strong.sort_by(|x, y| y.2.abs().total_cmp(&x.2.abs()));

        out.insight(format!("{} strongly correlated column pair(s) found", strong.len()));
        for (a, b, r) in strong.iter().take(self.config.max_reported_correlations) {
            out.insight(format!("Strong correlation between '{}' and '{}': {:.3}", a, b, r));
            out.recommend(format!(
                "Columns '{}' and '{}' may carry redundant information",
                a, b
            ));
            out.recommend(
                "Consider dropping one column of each strongly correlated pair to reduce dimensionality",
            );
        }
    }

    fn normality(&self, data: &ResultTable, out: &mut Insights) {
        let normal = data
            .column_cells(NORMAL)
            .filter(|(_, cell)| cell.as_text() == Some(YES))
            .count();
        let non_normal = data.row_count() - normal;

        out.insight(format!(
            "{} normal column(s), {} non-normal column(s)",
            normal, non_normal
        ));

        if non_normal > 0 {
            out.recommend("Use non-parametric tests for the non-normal columns");
            out.recommend("Apply a log or Box-Cox transform to normalize skewed columns");
        } else {
            out.recommend("The data is suitable for parametric methods");
        }
    }

    fn seasonality(out: &mut Insights) {
        out.insight("Seasonal patterns detected in the data");
        out.recommend("Model the series with seasonality taken into account");
        out.recommend("Use SARIMA or Prophet-style models for forecasting");
    }

    fn profitability(data: &ResultTable, out: &mut Insights) {
        let Some((column, share)) = data.argmax(SHARE_PERCENT) else {
            return;
        };
        out.insight(format!(
            "Column '{}' contributes the largest share: {}%",
            column, share
        ));
        out.recommend("Focus improvement efforts on the top contributing columns");
        out.recommend("Run a portfolio analysis to optimize the mix");
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}
