//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Upper bound for `batch_concurrency`; a batch never holds more URLs than this.
pub const MAX_BATCH_CONCURRENCY: usize = 5;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `google_base_url` is not an http(s) URL
    /// - `batch_concurrency` is outside 1..=5
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if !(self.google_base_url.starts_with("https://") || self.google_base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "google_base_url".into(),
                reason: "must start with http:// or https://".into(),
            });
        }

        if !(1..=MAX_BATCH_CONCURRENCY).contains(&self.batch_concurrency) {
            return Err(ConfigError::Invalid {
                field: "batch_concurrency".into(),
                reason: format!("must be between 1 and {MAX_BATCH_CONCURRENCY}"),
            });
        }

        if !self.block_private_hosts {
            tracing::warn!("block_private_hosts is disabled; pages on private networks can be fetched");
        }

        Ok(())
    }
}
