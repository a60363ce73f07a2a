//! Google Custom Search API client.
//!
//! Provides a client for the Custom Search JSON API with request validation
//! and response normalization.
//!
//! ### API Contract
//!
//! - **Endpoint**: `https://www.googleapis.com/customsearch/v1`
//! - **Authentication**: `key` (API key) and `cx` (search engine ID) query parameters.
//! - **Paging**: at most 10 results per call, never past rank 100.
//! - **Normalization**: results become `SearchResultItem`s with a host-based category,
//!   plus pagination and per-category counts.
//! - **No retries**: a failed call is reported to the caller as-is.

pub mod category;
pub mod error;
pub mod request;
pub mod response;

pub use error::GoogleError;
pub use request::SearchRequest;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use gsearch_core::{AppConfig, Error, SearchFilters, SearchOutcome, SearchService};
use reqwest::{StatusCode, header};

use crate::google::response::{GoogleApiResponse, GoogleErrorBody};

/// Default Custom Search endpoint.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "gsearch-mcp/0.1";

/// Google client configuration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API key; searching fails without it.
    pub api_key: Option<String>,
    /// Programmable Search Engine ID (`cx`); searching fails without it.
    pub search_engine_id: Option<String>,
    /// Endpoint URL (default: https://www.googleapis.com/customsearch/v1).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: gsearch-mcp/0.x).
    pub user_agent: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_engine_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GoogleConfig {
    /// Derive the client configuration from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.google_api_key.clone(),
            search_engine_id: config.google_search_engine_id.clone(),
            base_url: config.google_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), GoogleError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GoogleError::MissingCredentials("set GSEARCH_GOOGLE_API_KEY".to_string()))?;
        let cx = self
            .search_engine_id
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GoogleError::MissingCredentials("set GSEARCH_GOOGLE_SEARCH_ENGINE_ID".to_string()))?;
        Ok((key, cx))
    }
}

/// Google Custom Search API client.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleClient {
    /// Create a new Google client with the given configuration.
    ///
    /// Missing credentials are not an error here; they surface on the first search
    /// so the extraction tools stay usable without a Google key.
    pub fn new(config: GoogleConfig) -> Result<Self, GoogleError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Whether both credentials are configured.
    pub fn is_configured(&self) -> bool {
        self.config.credentials().is_ok()
    }

    /// Execute a validated search request.
    pub async fn execute(&self, req: &SearchRequest) -> Result<SearchOutcome, GoogleError> {
        let (key, cx) = self.config.credentials()?;

        let start = Instant::now();
        tracing::debug!(query = %req.q, start = req.start, num = req.num, "searching Google Custom Search");

        let http_response = self
            .http
            .get(&self.config.base_url)
            .header(header::ACCEPT, "application/json")
            .query(&[("key", key), ("cx", cx)])
            .query(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("Google API response status: {}", status);

        if !status.is_success() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body));
        }

        let bytes = http_response.bytes().await?;
        let api_response: GoogleApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| GoogleError::Parse(e.to_string()))?;

        let outcome = api_response.into_outcome(req);
        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), outcome.results.len());

        Ok(outcome)
    }

    /// Map a non-2xx status (and its error body, if any) to a client error.
    fn status_error(status: StatusCode, body: &str) -> GoogleError {
        let message = serde_json::from_str::<GoogleErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_default();

        match status {
            StatusCode::BAD_REQUEST if !message.is_empty() => GoogleError::InvalidQuery(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if !message.is_empty() => GoogleError::AuthError(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GoogleError::AuthError("invalid API key or search engine ID".to_string())
            }
            StatusCode::TOO_MANY_REQUESTS => GoogleError::RateLimited,
            _ => GoogleError::HttpError { status: status.as_u16() },
        }
    }
}

#[async_trait]
impl SearchService for GoogleClient {
    async fn search(&self, query: &str, num_results: u32, filters: &SearchFilters) -> Result<SearchOutcome, Error> {
        let req = SearchRequest::build(query, num_results, filters)?;
        Ok(self.execute(&req).await?)
    }
}
