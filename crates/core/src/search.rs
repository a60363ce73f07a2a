//! Search domain types.
//!
//! These describe what a search backend is asked for and what it hands back.
//! Ordering of results is the backend's; nothing downstream re-sorts them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of results to ask the backend for. Absent means general web results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[serde(alias = "images")]
    Image,
    News,
    #[serde(alias = "videos")]
    Video,
}

/// Result ordering requested from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Date,
}

/// Optional filters forwarded to the search backend as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict results to this domain.
    pub site: Option<String>,
    /// ISO 639-1 language code.
    pub language: Option<String>,
    /// `d[n]`, `w[n]`, `m[n]` or `y[n]`.
    pub date_restrict: Option<String>,
    /// Phrase every result must contain.
    pub exact_terms: Option<String>,
    pub result_type: Option<ResultType>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
    pub sort: Option<SortOrder>,
}

/// A single ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Pagination metadata reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Whether there is any adjacent page to navigate to.
    pub fn has_navigation(&self) -> bool {
        self.has_next_page || self.has_previous_page
    }
}

/// Number of results that fell into one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: u32,
}

/// Everything a search backend returns for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategorySummary>,
}

impl SearchOutcome {
    /// Count results per category, keeping the order in which categories first appear.
    pub fn summarize_categories(results: &[SearchResultItem]) -> Vec<CategorySummary> {
        let mut summaries: Vec<CategorySummary> = Vec::new();
        for name in results.iter().filter_map(|r| r.category.as_deref()) {
            match summaries.iter_mut().find(|c| c.name == name) {
                Some(existing) => existing.count += 1,
                None => summaries.push(CategorySummary { name: name.to_string(), count: 1 }),
            }
        }
        summaries
    }
}
