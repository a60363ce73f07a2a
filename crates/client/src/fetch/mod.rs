//! HTTP fetch pipeline with SSRF protection.
//!
//! ### URL Canonicalization
//! - Trim whitespace, require an http/https scheme
//! - Lowercase host, remove fragments
//! - Preserve query string
//!
//! ### SSRF & Safety Gates
//! - Deny private ranges (RFC1918, link-local, localhost, etc.)
//! - Resolve DNS through a filtering resolver: all A/AAAA answers must be public,
//!   and the checked answers are the ones connected to.
//! - Every redirect hop is re-checked before it is followed.
//! - Max redirects: 5
//! - Max body bytes: 5MB (configurable)

pub mod ssrf;
pub mod url;

use bytes::{Bytes, BytesMut};
use gsearch_core::{AppConfig, Error};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url, header};
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use self::ssrf::{PublicResolver, SsrfError, check_literal_host, resolve_public, validate_ip};
pub use self::url::{UrlError, canonicalize};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "gsearch-mcp/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Refuse hosts resolving to private/reserved addresses (default: true)
    pub block_private_hosts: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "gsearch-mcp/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
            block_private_hosts: true,
        }
    }
}

impl FetchConfig {
    /// Derive the fetch configuration from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            block_private_hosts: config.block_private_hosts,
            ..Default::default()
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The canonical URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Whether the body should be treated as HTML (also when no type was sent).
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("html"))
            .unwrap_or(true)
    }

    /// Whether the body is plain text that can be used as-is.
    pub fn is_plain_text(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain") || ct.starts_with("text/markdown"))
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// HTTP fetch client with safety checks.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    ///
    /// With `block_private_hosts` the client resolves names through
    /// [`PublicResolver`] and refuses redirects to private literal hosts.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(redirect_policy(config.max_redirects, config.block_private_hosts))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);

        if config.block_private_hosts {
            builder = builder.dns_resolver(Arc::new(PublicResolver));
        }

        let http = builder
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a URL, returning raw bytes and metadata.
    ///
    /// Performs the SSRF check and respects redirect/byte limits.
    pub async fn fetch(&self, url_str: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        if self.config.block_private_hosts {
            check_literal_host(&url).map_err(|e| Error::SsrfBlocked(e.to_string()))?;
        }

        let response = self
            .http
            .get(url.as_str())
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.5",
            )
            .send()
            .await
            .map_err(|e| self.request_error(&url, &e))?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());

        let bytes = self.read_body(response).await?;
        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { url, final_url, status, content_type, bytes, fetch_ms })
    }

    /// Read the body chunk by chunk, stopping as soon as it passes `max_bytes`.
    async fn read_body(&self, mut response: Response) -> Result<Bytes, Error> {
        let mut body = BytesMut::new();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::HttpError(format!("failed to read response: {}", e)))?
        {
            if body.len() + chunk.len() > self.config.max_bytes {
                return Err(Error::FetchTooLarge(format!("body exceeds {} bytes", self.config.max_bytes)));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    fn request_error(&self, url: &Url, err: &reqwest::Error) -> Error {
        if let Some(blocked) = ssrf_cause(err) {
            Error::SsrfBlocked(blocked.to_string())
        } else if err.is_timeout() {
            Error::FetchTimeout(format!("{} did not respond within {:?}", url, self.config.timeout))
        } else {
            Error::HttpError(format!("network error: {}", err))
        }
    }
}

/// Redirect policy that counts hops and re-checks each literal target host.
fn redirect_policy(max_redirects: usize, block_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            return attempt.error(format!("too many redirects (max {})", max_redirects));
        }
        if block_private_hosts && let Err(e) = check_literal_host(attempt.url()) {
            return attempt.error(e);
        }
        attempt.follow()
    })
}

/// Find an [`SsrfError`] raised by the resolver or the redirect policy.
fn ssrf_cause(err: &reqwest::Error) -> Option<&SsrfError> {
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        if let Some(blocked) = cause.downcast_ref::<SsrfError>() {
            return Some(blocked);
        }
        source = cause.source();
    }
    None
}
