//! Collaborator traits.
//!
//! The tool adapters only ever talk to these; concrete backends live in
//! `gsearch-client` and tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::content::{BatchOutcome, ExtractedContent, OutputFormat};
use crate::error::Error;
use crate::search::{SearchFilters, SearchOutcome};

/// A web search backend.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run `query` and return ranked results with pagination and category metadata.
    ///
    /// Filter semantics (date syntax, language codes, page bounds) are validated here,
    /// not by the caller.
    async fn search(&self, query: &str, num_results: u32, filters: &SearchFilters) -> Result<SearchOutcome, Error>;
}

/// A webpage fetch-and-convert backend.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch `url` and convert it into normalized content.
    async fn extract_content(&self, url: &str, format: OutputFormat) -> Result<ExtractedContent, Error>;

    /// Extract every URL independently.
    ///
    /// A single URL's failure must be reported as an error entry in the outcome;
    /// `Err` is reserved for failures of the batch as a whole.
    async fn batch_extract_content(&self, urls: &[String], format: OutputFormat) -> Result<BatchOutcome, Error>;
}
