//! Fuzz target for date parsing and the analysis pipeline.
//!
//! Arbitrary text in a date-shaped column must never panic date detection,
//! time-series grouping or insight generation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetlens::inference::parse_datetime;
use sheetlens::{Column, ReportAssembler, Table};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_datetime(content);

        let values: Vec<&str> = content.lines().take(200).collect();
        if values.is_empty() {
            return;
        }
        let numbers: Vec<Option<f64>> = (0..values.len()).map(|i| Some(i as f64)).collect();

        if let Ok(table) = Table::new(vec![
            Column::from_raw("date", &values),
            Column::numeric("value", &numbers),
        ]) {
            let _ = ReportAssembler::new().assemble(&table);
        }
    }
});
