//! Google Custom Search client error types.

use std::sync::Arc;

use gsearch_core::Error;

/// Errors from the Google Custom Search client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GoogleError {
    /// API key or search engine ID not configured.
    #[error("missing Google credentials: {0}")]
    MissingCredentials(String),

    /// Invalid search query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// dateRestrict not in `[dwmy]<number>` form.
    #[error("invalid dateRestrict '{0}': use d[number], w[number], m[number] or y[number], e.g. \"m6\"")]
    InvalidDateRestrict(String),

    /// Language is not an ISO 639-1 code.
    #[error("invalid language '{0}': use an ISO 639-1 code such as \"en\"")]
    InvalidLanguage(String),

    /// Page out of the range the API can serve.
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// Authentication failed (invalid API key or engine ID).
    #[error("authentication failed: {0}")]
    AuthError(String),

    /// Daily quota or per-minute rate limit exceeded.
    #[error("rate limited: Google API quota exceeded")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GoogleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GoogleError::Timeout } else { GoogleError::Network(Arc::new(err)) }
    }
}

impl From<GoogleError> for Error {
    fn from(err: GoogleError) -> Self {
        match err {
            GoogleError::MissingCredentials(_) | GoogleError::AuthError(_) => Error::GoogleAuthError(err.to_string()),
            GoogleError::InvalidQuery(_)
            | GoogleError::InvalidDateRestrict(_)
            | GoogleError::InvalidLanguage(_)
            | GoogleError::InvalidPage(_) => Error::InvalidInput(err.to_string()),
            GoogleError::RateLimited => Error::GoogleRateLimited(err.to_string()),
            GoogleError::Timeout => Error::FetchTimeout("Google search request timed out".to_string()),
            GoogleError::HttpError { status } => Error::HttpError(format!("Google API returned status {status}")),
            GoogleError::Network(_) => Error::HttpError(err.to_string()),
            GoogleError::Parse(_) => Error::SearchFailed(err.to_string()),
        }
    }
}
