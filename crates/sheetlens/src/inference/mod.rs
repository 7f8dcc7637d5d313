//! Column interpretation beyond storage type.

mod dates;

pub use dates::{DateColumnDetector, coerce_datetime, parse_datetime};
