//! Recording collaborator fakes for adapter and dispatcher tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use gsearch_core::{
    BatchItem, BatchOutcome, ContentExtractor, ContentPreview, ContentStats, Error, ExtractedContent, OutputFormat,
    SearchFilters, SearchOutcome, SearchService,
};
use rmcp::model::CallToolResult;

/// A single recorded `search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub num_results: u32,
    pub filters: SearchFilters,
}

/// [`SearchService`] returning a canned outcome and recording its arguments.
pub struct FakeSearch {
    response: Result<SearchOutcome, Error>,
    pub calls: Mutex<Vec<SearchCall>>,
}

impl FakeSearch {
    pub fn returning(outcome: SearchOutcome) -> Self {
        Self { response: Ok(outcome), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: Error) -> Self {
        Self { response: Err(error), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, query: &str, num_results: u32, filters: &SearchFilters) -> Result<SearchOutcome, Error> {
        self.calls
            .lock()
            .unwrap()
            .push(SearchCall { query: query.to_string(), num_results, filters: filters.clone() });
        self.response.clone()
    }
}

/// A recorded extractor call: `(urls, format)`.
pub type ExtractCall = (Vec<String>, OutputFormat);

/// [`ContentExtractor`] serving pages from a map; unknown URLs fail.
#[derive(Default)]
pub struct FakeExtractor {
    pages: HashMap<String, ExtractedContent>,
    batch_error: Option<Error>,
    /// URLs the batch call silently leaves out of its outcome.
    omitted: Vec<String>,
    pub single_calls: Mutex<Vec<ExtractCall>>,
    pub batch_calls: Mutex<Vec<ExtractCall>>,
}

impl FakeExtractor {
    pub fn with_page(mut self, content: ExtractedContent) -> Self {
        self.pages.insert(content.url.clone(), content);
        self
    }

    pub fn with_batch_error(mut self, error: Error) -> Self {
        self.batch_error = Some(error);
        self
    }

    pub fn omitting(mut self, url: &str) -> Self {
        self.omitted.push(url.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.single_calls.lock().unwrap().len() + self.batch_calls.lock().unwrap().len()
    }

    fn lookup(&self, url: &str) -> Result<ExtractedContent, Error> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::HttpError(format!("status 404 for {url}")))
    }
}

#[async_trait]
impl ContentExtractor for FakeExtractor {
    async fn extract_content(&self, url: &str, format: OutputFormat) -> Result<ExtractedContent, Error> {
        self.single_calls.lock().unwrap().push((vec![url.to_string()], format));
        self.lookup(url)
    }

    async fn batch_extract_content(&self, urls: &[String], format: OutputFormat) -> Result<BatchOutcome, Error> {
        self.batch_calls.lock().unwrap().push((urls.to_vec(), format));
        if let Some(error) = &self.batch_error {
            return Err(error.clone());
        }

        Ok(urls
            .iter()
            .filter(|url| !self.omitted.contains(url))
            .map(|url| match self.lookup(url) {
                Ok(content) => BatchItem::success(url.as_str(), content),
                Err(e) => BatchItem::failure(url.as_str(), e.to_string()),
            })
            .collect())
    }
}

/// A page with every optional field populated.
pub fn page(url: &str, title: &str, body: &str) -> ExtractedContent {
    ExtractedContent {
        url: url.to_string(),
        title: title.to_string(),
        description: Some(format!("About {title}")),
        stats: ContentStats { word_count: body.split_whitespace().count(), approximate_chars: body.chars().count() },
        summary: Some(format!("Summary of {title}.")),
        content_preview: ContentPreview::from_content(body),
    }
}

/// Concatenated text of a tool result.
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| content.as_text().map(|text| text.text.clone()))
        .collect::<Vec<_>>()
        .join("")
}

pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}
