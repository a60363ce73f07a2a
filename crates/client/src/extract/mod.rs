//! Readable content extraction using Lectito.
//!
//! ### Pipeline
//! - Fetch through [`FetchClient`] (canonicalization, SSRF gate, byte limit).
//! - HTML is run through Lectito's Readability-style extraction; when no
//!   article candidate qualifies, the `<body>` is used as-is.
//! - `text/plain` and `text/markdown` bodies pass through untouched.
//!
//! ### Output Normalization
//! - `format` selects Markdown, the article HTML, or plain text.
//! - Stats and the 500-character preview are computed over the formatted content;
//!   the summary always comes from the plain text.

pub mod metadata;
pub mod summary;

pub use metadata::{PageMetadata, extract_metadata};
pub use summary::{content_stats, summarize};

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use gsearch_core::{
    AppConfig, BatchItem, BatchOutcome, ContentExtractor, ContentPreview, Error, ExtractedContent, OutputFormat,
};
use scraper::{Html, Selector};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::fetch::{FetchClient, FetchConfig, FetchResponse};

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Default number of pages fetched at once in a batch.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Content of a page rendered in the requested format, before stats are taken.
#[derive(Debug, Clone)]
struct Rendered {
    title: Option<String>,
    content: String,
    plain_text: String,
}

/// [`ContentExtractor`] that fetches pages over HTTP and extracts the readable article.
#[derive(Debug, Clone)]
pub struct HttpContentExtractor {
    fetch: FetchClient,
    batch_concurrency: usize,
}

impl HttpContentExtractor {
    pub fn new(fetch: FetchClient, batch_concurrency: usize) -> Self {
        Self { fetch, batch_concurrency: batch_concurrency.max(1) }
    }

    /// Build the extractor and its fetch client from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        let fetch = FetchClient::new(FetchConfig::from_app_config(config))?;
        Ok(Self::new(fetch, config.batch_concurrency))
    }

    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    async fn extract_one(&self, url: &str, format: OutputFormat) -> Result<ExtractedContent, Error> {
        let response = self.fetch.fetch(url).await?;
        let page_url = response.final_url.to_string();

        let (rendered, description) = if response.is_plain_text() {
            let text = response.text();
            (Rendered { title: None, content: text.clone(), plain_text: text }, None)
        } else if response.is_html() {
            let html = response.text();
            let meta = extract_metadata(&html);
            let mut rendered = render_html(&html, &response, format)?;
            rendered.title = rendered.title.or(meta.title);
            (rendered, meta.description)
        } else {
            let content_type = response.content_type.as_deref().unwrap_or("unknown");
            return Err(Error::ExtractFailed(format!("unsupported content type: {}", content_type)));
        };

        if rendered.content.trim().is_empty() {
            return Err(Error::ExtractFailed(format!("no readable content found at {}", page_url)));
        }

        tracing::debug!(url = %page_url, format = format.as_str(), "extracted content");

        Ok(ExtractedContent {
            title: rendered.title.filter(|t| !t.trim().is_empty()).unwrap_or_else(|| page_url.clone()),
            url: page_url,
            description,
            stats: content_stats(&rendered.content),
            summary: summarize(&rendered.plain_text),
            content_preview: ContentPreview::from_content(&rendered.content),
        })
    }
}

/// Run readability extraction, falling back to the whole body when it finds no article.
fn render_html(html: &str, response: &FetchResponse, format: OutputFormat) -> Result<Rendered, Error> {
    let parsed = lectito_core::parse_with_url(html, response.final_url.as_str())
        .map_err(|e| e.to_string())
        .and_then(|article| {
            let plain_text = article.to_text();
            if plain_text.trim().is_empty() { Err("empty article".to_string()) } else { Ok((article, plain_text)) }
        });

    match parsed {
        Ok((article, plain_text)) => {
            let content = match format {
                OutputFormat::Markdown => article
                    .to_markdown()
                    .map_err(|e| Error::ExtractFailed(format!("Markdown conversion failed: {}", e)))?,
                OutputFormat::Html => article.content.clone(),
                OutputFormat::Text => plain_text.clone(),
            };
            Ok(Rendered { title: article.metadata.title, content, plain_text })
        }
        Err(reason) => {
            tracing::debug!(url = %response.final_url, "readability extraction failed, using body: {}", reason);
            let document = Html::parse_document(html);
            let Some(body) = document.select(&BODY).next() else {
                return Err(Error::ExtractFailed(format!("Failed to parse HTML: {}", reason)));
            };

            let plain_text = metadata::collapse_whitespace(&body.text().collect::<Vec<_>>().join(" "));
            let content = match format {
                OutputFormat::Html => body.inner_html().trim().to_string(),
                OutputFormat::Markdown | OutputFormat::Text => plain_text.clone(),
            };
            Ok(Rendered { title: None, content, plain_text })
        }
    }
}

#[async_trait]
impl ContentExtractor for HttpContentExtractor {
    async fn extract_content(&self, url: &str, format: OutputFormat) -> Result<ExtractedContent, Error> {
        self.extract_one(url, format).await
    }

    async fn batch_extract_content(&self, urls: &[String], format: OutputFormat) -> Result<BatchOutcome, Error> {
        let semaphore = Arc::new(Semaphore::new(self.batch_concurrency));
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().cloned().enumerate() {
            let extractor = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = extractor.extract_one(&url, format).await;
                (index, url, result)
            });
        }

        let mut items: Vec<(usize, BatchItem)> = Vec::with_capacity(urls.len());
        while let Some(joined) = tasks.join_next().await {
            let (index, url, result) =
                joined.map_err(|e| Error::ExtractFailed(format!("batch extraction task failed: {}", e)))?;

            let item = match result {
                Ok(content) => BatchItem::success(url, content),
                Err(e) => {
                    tracing::warn!(url = %url, code = e.code(), "batch extraction failed: {}", e);
                    BatchItem::failure(url, e.to_string())
                }
            };
            items.push((index, item));
        }

        items.sort_by_key(|(index, _)| *index);
        let outcome: BatchOutcome = items.into_iter().map(|(_, item)| item).collect();
        tracing::debug!(urls = urls.len(), failed = outcome.failed(), "batch extraction finished");
        Ok(outcome)
    }
}
