//! Custom Search JSON API response types and normalization.

use gsearch_core::{Pagination, SearchOutcome, SearchResultItem};
use serde::Deserialize;

use crate::google::category::categorize;
use crate::google::request::SearchRequest;

/// Raw response from the Custom Search JSON API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleApiResponse {
    #[serde(default)]
    pub items: Vec<GoogleItem>,
    #[serde(default)]
    pub search_information: Option<SearchInformation>,
    #[serde(default)]
    pub queries: Option<Queries>,
}

/// Individual search result from Google.
#[derive(Debug, Deserialize)]
pub struct GoogleItem {
    #[serde(default)]
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Totals reported alongside the results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    /// Reported as a decimal string, e.g. `"12300"`.
    #[serde(default)]
    pub total_results: Option<String>,
}

/// Query metadata; presence of `nextPage`/`previousPage` signals adjacent pages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queries {
    #[serde(default)]
    pub next_page: Vec<serde_json::Value>,
    #[serde(default)]
    pub previous_page: Vec<serde_json::Value>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    pub error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl GoogleApiResponse {
    /// Convert the raw response into the normalized outcome for `req`.
    pub fn into_outcome(self, req: &SearchRequest) -> SearchOutcome {
        let total_results = self
            .search_information
            .and_then(|info| info.total_results)
            .and_then(|total| total.parse::<u64>().ok());

        let queries = self.queries.unwrap_or_default();
        let has_next_page = !queries.next_page.is_empty() && req.next_page_in_range();
        let has_previous_page = req.page > 1 || !queries.previous_page.is_empty();

        let results: Vec<SearchResultItem> = self
            .items
            .into_iter()
            .map(|item| SearchResultItem {
                category: Some(categorize(&item.link).to_string()),
                title: item.title,
                link: item.link,
                snippet: item.snippet.replace('\n', " "),
            })
            .collect();

        let categories = SearchOutcome::summarize_categories(&results);

        SearchOutcome {
            results,
            pagination: Some(Pagination { current_page: req.page, total_results, has_next_page, has_previous_page }),
            categories,
        }
    }
}
