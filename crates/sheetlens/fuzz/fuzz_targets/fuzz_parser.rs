//! Fuzz target for the delimited-text loader.
//!
//! The parser must never panic on malformed input, whatever the delimiter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetlens::Parser;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() {
            let parser = Parser::new();
            let _ = parser.parse_file(temp_file.path());
        }
    }
});
