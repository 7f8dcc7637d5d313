//! SheetLens: analytical reports for tabular spreadsheet datasets.
//!
//! A loaded table runs through four analyzers (basic, time, statistical and
//! business). Each result table is paired with rule-based insights and
//! recommendations, and the whole is collected into a [`Report`].
//!
//! # Core Principles
//!
//! - **Never aborts**: analyses whose preconditions fail are skipped, and
//!   computation faults become error markers inside the result
//! - **Non-destructive**: the source table is never modified
//! - **Deterministic**: insights keep first-seen order
//!
//! # Example
//!
//! ```no_run
//! use sheetlens::SheetLens;
//!
//! let lens = SheetLens::new();
//! let outcome = lens.analyze("sales.xlsx").unwrap();
//!
//! for (category, entry) in outcome.report.entries() {
//!     println!("{}/{}: {:?}", category, entry.kind, entry.insights);
//! }
//! outcome.export("sales_report").unwrap();
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod inference;
pub mod input;
pub mod insight;
pub mod report;
pub mod stats;

mod sheetlens;

pub use crate::sheetlens::{AnalysisOutcome, DatasetSummary, SheetLens, SheetLensConfig};
pub use analysis::{AnalysisConfig, AnalysisKind, Analyzer, Category};
pub use data::{Cell, Column, ColumnKind, ResultTable, Table};
pub use error::{Result, SheetLensError};
pub use inference::DateColumnDetector;
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use insight::{InsightEngine, Insights};
pub use report::{AnalysisCategory, AnalysisEntry, Report, ReportAssembler, Sheet};
