//! Report assembly and export.

mod assembler;
mod entry;
mod export;

pub use assembler::ReportAssembler;
pub use entry::{AnalysisCategory, AnalysisEntry, Report};
pub use export::{SOURCE_SHEET, Sheet, export, select_sheet, sheet_name, sheets};
