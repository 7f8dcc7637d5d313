//! Runs every analyzer and files the results with their insights.

use tracing::{debug, info};

use crate::analysis::{
    AnalysisConfig, Analyzer, BasicAnalyzer, BusinessAnalyzer, StatisticalAnalyzer,
    TimeSeriesAnalyzer,
};
use crate::data::Table;
use crate::insight::InsightEngine;

use super::{AnalysisEntry, Report};

/// Drives the analysis pipeline over one table.
pub struct ReportAssembler {
    analyzers: Vec<Box<dyn Analyzer>>,
    engine: InsightEngine,
}

impl ReportAssembler {
    /// Create an assembler with the default analyzers and thresholds.
    pub fn new() -> Self {
        Self::with_config(&AnalysisConfig::default())
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(BasicAnalyzer::new()),
            Box::new(TimeSeriesAnalyzer::new()),
            Box::new(StatisticalAnalyzer::with_config(config)),
            Box::new(BusinessAnalyzer::new()),
        ];
        Self {
            analyzers,
            engine: InsightEngine::with_config(config.clone()),
        }
    }

    /// Run all analyzers. Never fails; skipped analyses are simply absent.
    pub fn assemble(&self, table: &Table) -> Report {
        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "assembling report"
        );

        let mut report = Report::new();
        for analyzer in &self.analyzers {
            let computed = analyzer.analyze(table);
            debug!(
                category = %analyzer.category(),
                analyses = computed.len(),
                "analyzer finished"
            );

            for c in computed {
                let insights = self.engine.generate(c.kind, &c.data, table);
                report.insert(AnalysisEntry::new(c.kind, c.data, insights));
            }
        }

        info!(entries = report.entry_count(), "report assembled");
        report
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new()
    }
}
