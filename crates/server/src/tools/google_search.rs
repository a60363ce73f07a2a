//! google_search tool implementation.
//!
//! Delegates to the configured [`SearchService`] and renders the outcome as
//! numbered plain-text results with category, pagination and navigation hints.

use std::fmt::Write as _;

use gsearch_core::{Error, ResultType, SearchFilters, SearchOutcome, SearchService, SortOrder};
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::de::{Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

use super::{error_result, text_result};

/// Results requested when `num_results` is omitted.
pub const DEFAULT_NUM_RESULTS: u32 = 5;

pub const NO_RESULTS_TEXT: &str =
    "No results found. Try:\n- Using different keywords\n- Removing quotes from non-exact phrases\n- Using more general terms";

/// Input parameters for the google_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GoogleSearchParams {
    /// Search query - be specific and use quotes for exact matches. For best results, use clear keywords and avoid very long queries.
    pub query: String,

    /// Number of results to return (default: 5, max: 10). Increase for broader coverage, decrease for faster response.
    #[serde(default = "default_num_results", deserialize_with = "whole_number")]
    pub num_results: u32,

    /// Limit search results to a specific website domain (e.g., "wikipedia.org" or "nytimes.com").
    #[serde(default)]
    pub site: Option<String>,

    /// Filter results by language using ISO 639-1 codes (e.g., "en" for English, "es" for Spanish, "fr" for French).
    #[serde(default)]
    pub language: Option<String>,

    /// Filter results by date using Google's date restriction format: "d[number]" for past days, "w[number]" for past weeks, "m[number]" for past months, or "y[number]" for past years. Example: "m6" for results from the past 6 months.
    #[serde(default, rename = "dateRestrict")]
    pub date_restrict: Option<String>,

    /// Search for results that contain this exact phrase. This is equivalent to putting the terms in quotes in the search query.
    #[serde(default, rename = "exactTerms")]
    pub exact_terms: Option<String>,

    /// Specify the type of results to return. Options include "image" (or "images"), "news", and "video" (or "videos"). Default is general web results.
    #[serde(default, rename = "resultType")]
    pub result_type: Option<ResultType>,

    /// Page number for paginated results (starts at 1). Use in combination with resultsPerPage to navigate through large result sets.
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub page: Option<u32>,

    /// Number of results to show per page (default: 5, max: 10). Controls how many results are returned for each page.
    #[serde(default, rename = "resultsPerPage", deserialize_with = "optional_whole_number")]
    pub results_per_page: Option<u32>,

    /// Sorting method for search results. Options: "relevance" (default) or "date" (most recent first).
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

/// Accept any JSON number with no fractional part, so `5` and `5.0` agree.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("expected a non-negative whole number, got {}", value)))
    }
}

fn optional_whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) => whole_number(value.into_deserializer()).map(Some),
        None => Ok(None),
    }
}

impl GoogleSearchParams {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            site: self.site.clone(),
            language: self.language.clone(),
            date_restrict: self.date_restrict.clone(),
            exact_terms: self.exact_terms.clone(),
            result_type: self.result_type,
            page: self.page,
            results_per_page: self.results_per_page,
            sort: self.sort,
        }
    }
}

pub async fn search_impl(service: &dyn SearchService, params: &GoogleSearchParams) -> CallToolResult {
    if params.query.trim().is_empty() {
        return error_result(Error::InvalidInput("query cannot be empty".into()).to_string());
    }

    let filters = params.filters();
    tracing::debug!(query = %params.query, num_results = params.num_results, "google_search");

    match service.search(&params.query, params.num_results, &filters).await {
        Ok(outcome) if outcome.results.is_empty() => error_result(NO_RESULTS_TEXT),
        Ok(outcome) => text_result(render_results(&params.query, &outcome)),
        Err(e) => {
            tracing::warn!(code = e.code(), "search failed: {}", e);
            let message = e.to_string();
            error_result(if message.is_empty() { "Unknown error during search".to_string() } else { message })
        }
    }
}

/// Render a non-empty search outcome.
pub fn render_results(query: &str, outcome: &SearchOutcome) -> String {
    let mut text = format!("Search results for \"{}\":\n\n", query);

    if !outcome.categories.is_empty() {
        let categories: Vec<String> = outcome
            .categories
            .iter()
            .map(|c| format!("{} ({})", c.name, c.count))
            .collect();
        let _ = write!(text, "Categories: {}\n\n", categories.join(", "));
    }

    if let Some(pagination) = &outcome.pagination {
        let _ = write!(text, "Showing page {}", pagination.current_page);
        if let Some(total) = pagination.total_results.filter(|total| *total > 0) {
            let _ = write!(text, " of approximately {} results", total);
        }
        text.push_str("\n\n");
    }

    for (index, result) in outcome.results.iter().enumerate() {
        let _ = write!(text, "{}. {}\n   URL: {}\n   {}\n\n", index + 1, result.title, result.link, result.snippet);
    }

    if let Some(pagination) = outcome.pagination.as_ref().filter(|p| p.has_navigation()) {
        text.push_str("Navigation: ");
        if pagination.has_previous_page {
            let _ = write!(text, "Use 'page: {}' for previous results. ", pagination.current_page.saturating_sub(1));
        }
        if pagination.has_next_page {
            let _ = write!(text, "Use 'page: {}' for more results.", pagination.current_page + 1);
        }
        text.push('\n');
    }

    text
}
