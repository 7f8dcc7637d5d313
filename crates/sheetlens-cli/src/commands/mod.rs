//! CLI command implementations.

pub mod analyze;
pub mod info;

use std::path::Path;

use sheetlens::{SheetLens, SheetLensConfig};

/// Build a SheetLens instance from the global options.
pub fn lens(config: Option<&Path>, max_rows: Option<usize>) -> sheetlens::Result<SheetLens> {
    let mut config = match config {
        Some(path) => SheetLensConfig::from_json_file(path)?,
        None => SheetLensConfig::default(),
    };
    if max_rows.is_some() {
        config.parser.max_rows = max_rows;
    }
    Ok(SheetLens::with_config(config))
}
