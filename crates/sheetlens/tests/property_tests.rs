//! Property-based tests for the analysis pipeline.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p sheetlens --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p sheetlens --test property_tests
//! ```

use proptest::prelude::*;

use sheetlens::analysis::labels::SHARE_PERCENT;
use sheetlens::analysis::{BasicAnalyzer, BusinessAnalyzer};
use sheetlens::{AnalysisKind, Cell, Column, InsightEngine, ReportAssembler, ResultTable, Table};

// =============================================================================
// Test Strategies
// =============================================================================

/// A numeric cell that is sometimes missing.
fn maybe_number() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (-1000.0f64..1000.0).prop_map(Some),
        1 => Just(None),
    ]
}

/// A table of `cols` numeric columns sharing one row count.
fn numeric_table(cols: usize) -> impl Strategy<Value = Table> {
    (2usize..30).prop_flat_map(move |rows| {
        prop::collection::vec(prop::collection::vec(maybe_number(), rows), cols).prop_map(|columns| {
            let columns = columns
                .iter()
                .enumerate()
                .map(|(i, values)| Column::numeric(format!("c{}", i), values))
                .collect();
            Table::new(columns).unwrap()
        })
    })
}

/// Raw spreadsheet text: numbers, dates, nulls and junk.
fn raw_value() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1e6f64..1e6).prop_map(|v| v.to_string()),
        (2000i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{}-{:02}-{:02}", y, m, d)),
        Just(String::new()),
        Just("NA".to_string()),
        "[a-zA-Z0-9 /:.-]{0,12}",
    ]
}

fn raw_table() -> impl Strategy<Value = Table> {
    (1usize..5, 1usize..15).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(prop::collection::vec(raw_value(), rows), cols).prop_map(|columns| {
            let columns = columns
                .iter()
                .enumerate()
                .map(|(i, values)| {
                    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
                    Column::from_raw(format!("col{}", i), &refs)
                })
                .collect();
            Table::new(columns).unwrap()
        })
    })
}

fn any_kind() -> impl Strategy<Value = AnalysisKind> {
    prop_oneof![
        Just(AnalysisKind::DescriptiveStatistics),
        Just(AnalysisKind::MissingData),
        Just(AnalysisKind::GeneralInfo),
        Just(AnalysisKind::CorrelationMatrix),
        Just(AnalysisKind::Monthly),
        Just(AnalysisKind::Quarterly),
        Just(AnalysisKind::Yearly),
        Just(AnalysisKind::TimeSeriesError),
        Just(AnalysisKind::NormalityTest),
        Just(AnalysisKind::OutlierAnalysis),
        Just(AnalysisKind::Profitability),
        Just(AnalysisKind::GrowthRate),
    ]
}

/// A non-empty result table whose labels may or may not match what the
/// heuristics look for.
fn result_table() -> impl Strategy<Value = ResultTable> {
    let label = prop_oneof![
        Just("missing_count".to_string()),
        Just("missing_percent".to_string()),
        Just("outlier_percent".to_string()),
        Just("share_percent".to_string()),
        Just("normal".to_string()),
        "[a-z]{1,6}",
    ];
    let cell = prop_oneof![
        (-200.0f64..200.0).prop_map(Cell::Number),
        Just(Cell::Missing),
        Just(Cell::text("yes")),
        "[a-z]{0,5}".prop_map(Cell::Text),
    ];
    (
        prop::collection::vec(label, 1..5),
        prop::collection::vec(("[a-z]{1,4}", prop::collection::vec(cell, 0..6)), 1..6),
    )
        .prop_map(|(columns, rows)| {
            let mut table = ResultTable::new(columns);
            for (label, cells) in rows {
                table.push_row(label, cells);
            }
            table
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn correlation_matrix_is_symmetric(table in numeric_table(3)) {
        if let Some(matrix) = BasicAnalyzer::new().correlation(&table) {
            for a in &matrix.columns {
                for b in &matrix.columns {
                    prop_assert_eq!(matrix.get(a, b), matrix.get(b, a));
                }
                if let Some(diag) = matrix.number(a, a) {
                    prop_assert!((diag - 1.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn insights_are_never_empty(
        kind in any_kind(),
        data in result_table(),
        source in raw_table(),
    ) {
        let out = InsightEngine::new().generate(kind, &data, &source);
        prop_assert!(!out.insights.is_empty());
        prop_assert!(!out.recommendations.is_empty());
    }

    #[test]
    fn profitability_shares_sum_to_100(
        columns in prop::collection::vec(prop::collection::vec(1.0f64..500.0, 5), 1..6)
    ) {
        let table = Table::new(
            columns
                .iter()
                .enumerate()
                .map(|(i, values)| {
                    let values: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
                    Column::numeric(format!("p{}", i), &values)
                })
                .collect(),
        )
        .unwrap();

        let result = BusinessAnalyzer::new().profitability(&table).unwrap();
        let total: f64 = result
            .column_cells(SHARE_PERCENT)
            .filter_map(|(_, c)| c.as_number())
            .sum();
        prop_assert!((total - 100.0).abs() < 0.01 * result.row_count() as f64);
    }

    #[test]
    fn pipeline_never_panics(table in raw_table()) {
        let report = ReportAssembler::new().assemble(&table);
        prop_assert!(report.contains(AnalysisKind::GeneralInfo));
        for (_, entry) in report.entries() {
            prop_assert!(!entry.insights.is_empty());
            prop_assert!(!entry.recommendations.is_empty());
        }
    }

    #[test]
    fn numeric_pipeline_never_panics(table in numeric_table(2)) {
        let report = ReportAssembler::new().assemble(&table);
        prop_assert!(report.contains(AnalysisKind::DescriptiveStatistics) || table.numeric_columns().is_empty());
    }
}
