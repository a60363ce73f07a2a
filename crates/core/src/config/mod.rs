//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (GSEARCH_*)
//! 2. TOML config file (if GSEARCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (GSEARCH_*)
/// 2. TOML config file (if GSEARCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Google Custom Search API key.
    ///
    /// Set via GSEARCH_GOOGLE_API_KEY environment variable.
    /// Required only when google_search is called.
    #[serde(default)]
    pub google_api_key: Option<String>,

    /// Programmable Search Engine ID (`cx`).
    ///
    /// Set via GSEARCH_GOOGLE_SEARCH_ENGINE_ID environment variable.
    #[serde(default)]
    pub google_search_engine_id: Option<String>,

    /// Custom Search JSON API endpoint.
    ///
    /// Set via GSEARCH_GOOGLE_BASE_URL environment variable.
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via GSEARCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via GSEARCH_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via GSEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Refuse to fetch pages that resolve to private or reserved addresses.
    ///
    /// Set via GSEARCH_BLOCK_PRIVATE_HOSTS environment variable.
    #[serde(default = "default_true")]
    pub block_private_hosts: bool,

    /// How many pages of one batch are fetched at the same time.
    ///
    /// Set via GSEARCH_BATCH_CONCURRENCY environment variable.
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

fn default_google_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".into()
}

fn default_user_agent() -> String {
    "gsearch-mcp/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_true() -> bool {
    true
}

fn default_batch_concurrency() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_search_engine_id: None,
            google_base_url: default_google_base_url(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            block_private_hosts: true,
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `GSEARCH_`
    /// 2. TOML file from `GSEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("GSEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("GSEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Google API key and search engine ID (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first credential that is not set.
    pub fn require_google_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let key = self.google_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "google_api_key".into(),
            hint: "Set GSEARCH_GOOGLE_API_KEY environment variable".into(),
        })?;
        let cx = self.google_search_engine_id.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "google_search_engine_id".into(),
            hint: "Set GSEARCH_GOOGLE_SEARCH_ENGINE_ID environment variable".into(),
        })?;
        Ok((key, cx))
    }
}
