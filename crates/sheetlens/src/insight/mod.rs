//! Natural-language insights for analysis results.

mod engine;
mod insights;

pub use engine::{GENERIC_INSIGHT, GENERIC_RECOMMENDATION, InsightEngine};
pub use insights::Insights;
