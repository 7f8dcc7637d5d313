//! Report structure: categories of named analysis entries.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisKind, Category};
use crate::data::ResultTable;
use crate::insight::Insights;

/// One analysis result with its derived insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub kind: AnalysisKind,
    pub data: ResultTable,
    pub insights: IndexSet<String>,
    pub recommendations: IndexSet<String>,
}

impl AnalysisEntry {
    pub fn new(kind: AnalysisKind, data: ResultTable, insights: Insights) -> Self {
        Self {
            kind,
            data,
            insights: insights.insights,
            recommendations: insights.recommendations,
        }
    }
}

/// Analysis name to entry, in computation order.
pub type AnalysisCategory = IndexMap<String, AnalysisEntry>;

/// The full output of one pipeline run.
///
/// Every category is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub categories: IndexMap<Category, AnalysisCategory>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            categories: Category::ALL
                .iter()
                .map(|c| (*c, AnalysisCategory::new()))
                .collect(),
        }
    }

    /// File an entry under its kind's category, replacing any entry of the
    /// same name.
    pub fn insert(&mut self, entry: AnalysisEntry) {
        self.categories
            .entry(entry.kind.category())
            .or_default()
            .insert(entry.kind.name().to_string(), entry);
    }

    pub fn category(&self, category: Category) -> Option<&AnalysisCategory> {
        self.categories.get(&category)
    }

    pub fn entry(&self, kind: AnalysisKind) -> Option<&AnalysisEntry> {
        self.category(kind.category())?.get(kind.name())
    }

    pub fn contains(&self, kind: AnalysisKind) -> bool {
        self.entry(kind).is_some()
    }

    /// All entries with their category, in report order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &AnalysisEntry)> {
        self.categories
            .iter()
            .flat_map(|(category, entries)| entries.values().map(move |e| (*category, e)))
    }

    pub fn entry_count(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_has_all_categories() {
        let report = Report::new();
        let categories: Vec<Category> = report.categories.keys().copied().collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert!(report.is_empty());
    }

    #[test]
    fn test_insert_files_by_category() {
        let mut report = Report::new();
        let mut insights = Insights::new();
        insights.insight("one");
        insights.recommend("two");
        report.insert(AnalysisEntry::new(
            AnalysisKind::GrowthRate,
            ResultTable::new(["growth_percent"]),
            insights,
        ));

        assert!(report.contains(AnalysisKind::GrowthRate));
        assert!(!report.contains(AnalysisKind::Profitability));
        assert_eq!(report.category(Category::Business).map(|c| c.len()), Some(1));
        assert_eq!(report.entry_count(), 1);

        let (category, entry) = report.entries().next().unwrap();
        assert_eq!(category, Category::Business);
        assert!(entry.insights.contains("one"));
    }
}
