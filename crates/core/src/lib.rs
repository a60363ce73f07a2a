//! Core types and shared functionality for gsearch.
//!
//! This crate provides:
//! - Domain types for search results and extracted page content
//! - The collaborator traits the tool adapters delegate to
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod content;
pub mod error;
pub mod search;
pub mod services;

pub use config::{AppConfig, ConfigError};
pub use content::{BatchItem, BatchOutcome, ContentPreview, ContentStats, ExtractedContent, OutputFormat};
pub use error::Error;
pub use search::{CategorySummary, Pagination, ResultType, SearchFilters, SearchOutcome, SearchResultItem, SortOrder};
pub use services::{ContentExtractor, SearchService};
