//! Client code for gsearch.
//!
//! This crate provides the concrete collaborators behind the MCP tools: the
//! Google Custom Search client and the HTTP fetch and content extraction pipeline.

pub mod extract;
pub mod fetch;
pub mod google;

pub use extract::{HttpContentExtractor, PageMetadata, extract_metadata};
pub use fetch::{FetchClient, FetchConfig, FetchResponse};
pub use google::{GoogleClient, GoogleConfig, GoogleError};
