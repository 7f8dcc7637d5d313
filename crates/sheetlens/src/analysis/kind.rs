//! Names for analysis categories and the analyses within them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Report category; one per analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Basic,
    Time,
    Statistical,
    Business,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 4] = [
        Category::Basic,
        Category::Time,
        Category::Statistical,
        Category::Business,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Basic => "basic",
            Category::Time => "time",
            Category::Statistical => "statistical",
            Category::Business => "business",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single named analysis. Selects the insight heuristic applied to its
/// result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    DescriptiveStatistics,
    MissingData,
    GeneralInfo,
    CorrelationMatrix,
    Monthly,
    Quarterly,
    Yearly,
    /// Time-series analysis failed; the table carries the message.
    TimeSeriesError,
    NormalityTest,
    OutlierAnalysis,
    Profitability,
    GrowthRate,
}

impl AnalysisKind {
    /// Key of the analysis within its category.
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisKind::DescriptiveStatistics => "descriptive_statistics",
            AnalysisKind::MissingData => "missing_data",
            AnalysisKind::GeneralInfo => "general_info",
            AnalysisKind::CorrelationMatrix => "correlation_matrix",
            AnalysisKind::Monthly => "monthly",
            AnalysisKind::Quarterly => "quarterly",
            AnalysisKind::Yearly => "yearly",
            AnalysisKind::TimeSeriesError => "error",
            AnalysisKind::NormalityTest => "normality_test",
            AnalysisKind::OutlierAnalysis => "outliers",
            AnalysisKind::Profitability => "profitability",
            AnalysisKind::GrowthRate => "growth_rate",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            AnalysisKind::DescriptiveStatistics
            | AnalysisKind::MissingData
            | AnalysisKind::GeneralInfo
            | AnalysisKind::CorrelationMatrix => Category::Basic,
            AnalysisKind::Monthly
            | AnalysisKind::Quarterly
            | AnalysisKind::Yearly
            | AnalysisKind::TimeSeriesError => Category::Time,
            AnalysisKind::NormalityTest | AnalysisKind::OutlierAnalysis => Category::Statistical,
            AnalysisKind::Profitability | AnalysisKind::GrowthRate => Category::Business,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
