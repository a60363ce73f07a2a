//! Custom Search JSON API request construction and validation.

use std::sync::LazyLock;

use gsearch_core::{ResultType, SearchFilters, SortOrder};
use regex::Regex;
use serde::Serialize;

use crate::google::GoogleError;

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 10;

/// The API never serves results past this rank.
pub const MAX_RESULT_RANK: u32 = 100;

/// Longest query the API accepts.
const MAX_QUERY_CHARS: usize = 2048;

static DATE_RESTRICT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[dwmy]\d+$").expect("valid regex"));
static LANGUAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("valid regex"));

/// Query parameters for one Custom Search API call (credentials excluded).
///
/// Based on the Custom Search JSON API reference:
/// https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search terms, including any result-type hint.
    pub q: String,

    /// Results per page (1-10).
    pub num: u32,

    /// 1-based index of the first result.
    pub start: u32,

    #[serde(rename = "siteSearch", skip_serializing_if = "Option::is_none")]
    pub site_search: Option<String>,

    /// `i` includes only results from `siteSearch`.
    #[serde(rename = "siteSearchFilter", skip_serializing_if = "Option::is_none")]
    pub site_search_filter: Option<String>,

    /// Language restriction, e.g. `lang_en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr: Option<String>,

    #[serde(rename = "dateRestrict", skip_serializing_if = "Option::is_none")]
    pub date_restrict: Option<String>,

    #[serde(rename = "exactTerms", skip_serializing_if = "Option::is_none")]
    pub exact_terms: Option<String>,

    /// `image` for image search; omitted for web search.
    #[serde(rename = "searchType", skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// The 1-based page this request represents.
    #[serde(skip)]
    pub page: u32,
}

impl SearchRequest {
    /// Build and validate a request from the tool-level query and filters.
    ///
    /// The page size is `results_per_page` when set, otherwise `num_results`,
    /// clamped to 1..=10.
    pub fn build(query: &str, num_results: u32, filters: &SearchFilters) -> Result<Self, GoogleError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GoogleError::InvalidQuery("query cannot be empty".to_string()));
        }

        let char_count = trimmed.chars().count();
        if char_count > MAX_QUERY_CHARS {
            return Err(GoogleError::InvalidQuery(format!("query too long: {char_count} chars (max {MAX_QUERY_CHARS})")));
        }

        let page = filters.page.unwrap_or(1);
        if page == 0 {
            return Err(GoogleError::InvalidPage("page numbers start at 1".to_string()));
        }

        let num = filters.results_per_page.unwrap_or(num_results).clamp(1, MAX_PAGE_SIZE);
        let start = (page - 1).saturating_mul(num).saturating_add(1);
        if start.saturating_add(num - 1) > MAX_RESULT_RANK {
            return Err(GoogleError::InvalidPage(format!(
                "page {page} with {num} results per page goes past the first {MAX_RESULT_RANK} results"
            )));
        }

        let date_restrict = match filters.date_restrict.as_deref().map(str::trim) {
            Some(value) if DATE_RESTRICT.is_match(value) => Some(value.to_string()),
            Some(value) => return Err(GoogleError::InvalidDateRestrict(value.to_string())),
            None => None,
        };

        let lr = match filters.language.as_deref().map(|l| l.trim().to_lowercase()) {
            Some(code) if LANGUAGE.is_match(&code) => Some(format!("lang_{code}")),
            Some(code) => return Err(GoogleError::InvalidLanguage(code)),
            None => None,
        };

        let mut q = trimmed.to_string();
        let search_type = match filters.result_type {
            Some(ResultType::Image) => Some("image".to_string()),
            Some(ResultType::News) => {
                q.push_str(" news");
                None
            }
            Some(ResultType::Video) => {
                q.push_str(" video");
                None
            }
            None => None,
        };

        let site_search = filters.site.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        let site_search_filter = site_search.as_ref().map(|_| "i".to_string());

        let sort = match filters.sort {
            Some(SortOrder::Date) => Some("date".to_string()),
            Some(SortOrder::Relevance) | None => None,
        };

        Ok(Self {
            q,
            num,
            start,
            site_search,
            site_search_filter,
            lr,
            date_restrict,
            exact_terms: filters.exact_terms.clone().filter(|t| !t.trim().is_empty()),
            search_type,
            sort,
            page,
        })
    }

    /// Whether a following page can still be requested from the API.
    pub fn next_page_in_range(&self) -> bool {
        self.start.saturating_add(self.num.saturating_mul(2)).saturating_sub(1) <= MAX_RESULT_RANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request() {
        let req = SearchRequest::build("rust ownership", 5, &SearchFilters::default()).unwrap();
        assert_eq!(req.q, "rust ownership");
        assert_eq!(req.num, 5);
        assert_eq!(req.start, 1);
        assert_eq!(req.page, 1);
        assert!(req.site_search.is_none());
        assert!(req.lr.is_none());
        assert!(req.sort.is_none());
    }

    #[test]
    fn test_empty_query() {
        let result = SearchRequest::build("   ", 5, &SearchFilters::default());
        assert!(matches!(result, Err(GoogleError::InvalidQuery(_))));
    }

    #[test]
    fn test_query_too_long() {
        let result = SearchRequest::build(&"a".repeat(2049), 5, &SearchFilters::default());
        assert!(matches!(result, Err(GoogleError::InvalidQuery(_))));
    }

    #[test]
    fn test_page_size_clamped() {
        let req = SearchRequest::build("q", 50, &SearchFilters::default()).unwrap();
        assert_eq!(req.num, 10);

        let req = SearchRequest::build("q", 0, &SearchFilters::default()).unwrap();
        assert_eq!(req.num, 1);
    }

    #[test]
    fn test_results_per_page_overrides_num_results() {
        let filters = SearchFilters { results_per_page: Some(3), page: Some(3), ..Default::default() };
        let req = SearchRequest::build("q", 8, &filters).unwrap();
        assert_eq!(req.num, 3);
        assert_eq!(req.start, 7);
        assert_eq!(req.page, 3);
    }

    #[test]
    fn test_page_zero_rejected() {
        let filters = SearchFilters { page: Some(0), ..Default::default() };
        assert!(matches!(SearchRequest::build("q", 5, &filters), Err(GoogleError::InvalidPage(_))));
    }

    #[test]
    fn test_page_past_result_limit_rejected() {
        let last = SearchFilters { page: Some(10), results_per_page: Some(10), ..Default::default() };
        assert!(SearchRequest::build("q", 5, &last).is_ok());

        let beyond = SearchFilters { page: Some(11), results_per_page: Some(10), ..Default::default() };
        assert!(matches!(SearchRequest::build("q", 5, &beyond), Err(GoogleError::InvalidPage(_))));
    }

    #[test]
    fn test_date_restrict_validation() {
        for value in ["d1", "w2", "m6", "y10"] {
            let filters = SearchFilters { date_restrict: Some(value.into()), ..Default::default() };
            let req = SearchRequest::build("q", 5, &filters).unwrap();
            assert_eq!(req.date_restrict.as_deref(), Some(value));
        }

        for value in ["6m", "m", "x3", "m6d"] {
            let filters = SearchFilters { date_restrict: Some(value.into()), ..Default::default() };
            assert!(
                matches!(SearchRequest::build("q", 5, &filters), Err(GoogleError::InvalidDateRestrict(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_language_mapping() {
        let filters = SearchFilters { language: Some("ES".into()), ..Default::default() };
        let req = SearchRequest::build("q", 5, &filters).unwrap();
        assert_eq!(req.lr.as_deref(), Some("lang_es"));

        let filters = SearchFilters { language: Some("english".into()), ..Default::default() };
        assert!(matches!(SearchRequest::build("q", 5, &filters), Err(GoogleError::InvalidLanguage(_))));
    }

    #[test]
    fn test_result_type_mapping() {
        let image = SearchFilters { result_type: Some(ResultType::Image), ..Default::default() };
        let req = SearchRequest::build("cats", 5, &image).unwrap();
        assert_eq!(req.search_type.as_deref(), Some("image"));
        assert_eq!(req.q, "cats");

        let news = SearchFilters { result_type: Some(ResultType::News), ..Default::default() };
        let req = SearchRequest::build("cats", 5, &news).unwrap();
        assert_eq!(req.q, "cats news");
        assert!(req.search_type.is_none());
    }

    #[test]
    fn test_site_sort_and_exact_terms() {
        let filters = SearchFilters {
            site: Some("wikipedia.org".into()),
            sort: Some(SortOrder::Date),
            exact_terms: Some("borrow checker".into()),
            ..Default::default()
        };
        let req = SearchRequest::build("rust", 5, &filters).unwrap();
        assert_eq!(req.site_search.as_deref(), Some("wikipedia.org"));
        assert_eq!(req.site_search_filter.as_deref(), Some("i"));
        assert_eq!(req.sort.as_deref(), Some("date"));
        assert_eq!(req.exact_terms.as_deref(), Some("borrow checker"));
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let req = SearchRequest::build("q", 5, &SearchFilters::default()).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("q") && obj.contains_key("num") && obj.contains_key("start"));
    }

    #[test]
    fn test_next_page_in_range() {
        let filters = SearchFilters { page: Some(9), results_per_page: Some(10), ..Default::default() };
        assert!(SearchRequest::build("q", 5, &filters).unwrap().next_page_in_range());

        let filters = SearchFilters { page: Some(10), results_per_page: Some(10), ..Default::default() };
        assert!(!SearchRequest::build("q", 5, &filters).unwrap().next_page_in_range());
    }
}
