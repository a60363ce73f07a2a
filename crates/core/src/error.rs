//! Unified error types for gsearch.
//!
//! Every variant renders with a stable code prefix so the text surfaced to the
//! calling agent identifies the failure class.

/// Unified error type shared by the collaborators and the tool adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid or unsupported URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Content extraction failed.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// SSRF blocked - private/internal address not allowed.
    #[error("SSRF_BLOCKED: {0}")]
    SsrfBlocked(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Google API credentials missing or rejected.
    #[error("GOOGLE_AUTH_ERROR: {0}")]
    GoogleAuthError(String),

    /// Google API quota or rate limit exceeded.
    #[error("GOOGLE_RATE_LIMITED: {0}")]
    GoogleRateLimited(String),

    /// The search backend answered with something unusable.
    #[error("SEARCH_FAILED: {0}")]
    SearchFailed(String),
}

impl Error {
    /// The stable code prefix for this error class.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::ExtractFailed(_) => "EXTRACT_FAILED",
            Error::SsrfBlocked(_) => "SSRF_BLOCKED",
            Error::FetchTimeout(_) => "FETCH_TIMEOUT",
            Error::FetchTooLarge(_) => "FETCH_TOO_LARGE",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::GoogleAuthError(_) => "GOOGLE_AUTH_ERROR",
            Error::GoogleRateLimited(_) => "GOOGLE_RATE_LIMITED",
            Error::SearchFailed(_) => "SEARCH_FAILED",
        }
    }
}
