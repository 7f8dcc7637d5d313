//! Deduplicated insight and recommendation statements.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Natural-language findings and advice derived from one result table.
///
/// Both sets keep first-seen order and drop repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub insights: IndexSet<String>,
    pub recommendations: IndexSet<String>,
}

impl Insights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding; repeats are ignored.
    pub fn insight(&mut self, text: impl Into<String>) {
        self.insights.insert(text.into());
    }

    /// Record a recommendation; repeats are ignored.
    pub fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.insert(text.into());
    }

    pub fn has_insight(&self, text: &str) -> bool {
        self.insights.contains(text)
    }

    pub fn has_recommendation(&self, text: &str) -> bool {
        self.recommendations.contains(text)
    }
}
