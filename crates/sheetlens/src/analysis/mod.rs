//! Analyzers that turn a table into named result tables.
//!
//! Each analyzer owns one report [`Category`]. Analyzers never fail: a missing
//! precondition skips the analysis, and a computation fault is written into
//! the result as an error marker.

mod basic;
mod business;
mod kind;
mod statistical;
mod time;

use serde::{Deserialize, Serialize};

use crate::data::{ResultTable, Table};

pub use basic::BasicAnalyzer;
pub use business::BusinessAnalyzer;
pub use kind::{AnalysisKind, Category};
pub use statistical::StatisticalAnalyzer;
pub use time::{Period, TimeSeriesAnalyzer, TimeSeriesError};

/// Column and marker labels used in result tables.
pub mod labels {
    pub const MISSING_COUNT: &str = "missing_count";
    pub const MISSING_PERCENT: &str = "missing_percent";

    pub const VALUE: &str = "value";

    pub const STATISTIC: &str = "statistic";
    pub const P_VALUE: &str = "p_value";
    pub const NORMAL: &str = "normal";
    pub const ERROR: &str = "error";

    pub const OUTLIER_COUNT: &str = "outlier_count";
    pub const OUTLIER_PERCENT: &str = "outlier_percent";
    pub const LOWER_BOUND: &str = "lower_bound";
    pub const UPPER_BOUND: &str = "upper_bound";

    pub const TOTAL: &str = "total";
    pub const MEAN: &str = "mean";
    pub const SHARE_PERCENT: &str = "share_percent";

    pub const GROWTH_PERCENT: &str = "growth_percent";

    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}

/// Tunable thresholds. Defaults reproduce the reference heuristics exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fence distance in IQRs for outlier bounds.
    pub iqr_multiplier: f64,
    /// p-value above which a column counts as normal.
    pub normality_alpha: f64,
    /// Minimum non-null values for a normality test.
    pub min_normality_samples: usize,
    /// |r| above which a pair is strongly correlated.
    pub strong_correlation: f64,
    /// Strong pairs named in insights.
    pub max_reported_correlations: usize,
    /// Outlier percentage above which a column is flagged.
    pub outlier_alert_percent: f64,
    /// Missing percentage above which dropping the column is advised.
    pub missing_drop_percent: f64,
    /// Missing percentage above which advanced imputation is advised.
    pub missing_advanced_percent: f64,
    /// Coefficient of variation above which a column is volatile.
    pub high_volatility_cov: f64,
    /// Coefficient of variation below which a column is stable.
    pub low_volatility_cov: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            normality_alpha: 0.05,
            min_normality_samples: 4,
            strong_correlation: 0.7,
            max_reported_correlations: 3,
            outlier_alert_percent: 10.0,
            missing_drop_percent: 50.0,
            missing_advanced_percent: 20.0,
            high_volatility_cov: 50.0,
            low_volatility_cov: 10.0,
        }
    }
}

/// A result table tagged with the analysis that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    pub kind: AnalysisKind,
    pub data: ResultTable,
}

impl Computed {
    pub fn new(kind: AnalysisKind, data: ResultTable) -> Self {
        Self { kind, data }
    }
}

/// One report category's worth of analyses.
pub trait Analyzer {
    /// Category the produced analyses are filed under.
    fn category(&self) -> Category;

    /// Run every analysis whose preconditions hold, in report order.
    fn analyze(&self, table: &Table) -> Vec<Computed>;
}
