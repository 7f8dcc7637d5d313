//! Tabular data model: source tables and computed result tables.

mod result;
mod table;
mod types;

pub use result::{ResultRow, ResultTable};
pub use table::{Column, Table};
pub use types::{Cell, ColumnKind};
