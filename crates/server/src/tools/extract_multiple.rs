//! extract_multiple_webpages tool implementation.
//!
//! A failing page never hides the others: the collaborator reports each URL
//! separately and the response lists every requested URL in request order.

use std::fmt::Write as _;

use gsearch_core::content::truncate_chars;
use gsearch_core::{BatchOutcome, ContentExtractor, Error, ExtractedContent, OutputFormat};
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{error_result, text_result};

/// Most URLs accepted in one call.
pub const MAX_BATCH_URLS: usize = 5;

/// Preview characters shown per page in batch responses.
pub const BATCH_PREVIEW_CHARS: usize = 150;

pub const TOO_MANY_URLS_TEXT: &str =
    "Maximum 5 URLs allowed per request to maintain performance. Please reduce the number of URLs.";

pub const BATCH_NOTE: &str = "Note: These are previews of the content. To analyze the full content of a specific URL, use the extract_webpage_content tool with that URL.";

pub const BATCH_TROUBLESHOOTING: &str = "Common issues:\n- Check if all URLs are accessible in a browser\n- Ensure all webpages are public\n- Try again if it's a temporary network issue\n- Consider reducing the number of URLs";

/// Input parameters for the extract_multiple_webpages tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractMultipleParams {
    /// Array of webpage URLs to extract content from. Each URL must be public and start with http:// or https://. Maximum 5 URLs per request.
    pub urls: Vec<String>,

    /// Output format for the extracted content. Options: "markdown" (default), "html", or "text".
    #[serde(default)]
    pub format: OutputFormat,
}

pub async fn batch_extract_impl(extractor: &dyn ContentExtractor, params: &ExtractMultipleParams) -> CallToolResult {
    if params.urls.len() > MAX_BATCH_URLS {
        return error_result(TOO_MANY_URLS_TEXT);
    }
    if params.urls.is_empty() {
        return error_result(Error::InvalidInput("at least one URL is required".into()).to_string());
    }

    tracing::debug!(count = params.urls.len(), format = params.format.as_str(), "extract_multiple_webpages");

    match extractor.batch_extract_content(&params.urls, params.format).await {
        Ok(outcome) => text_result(render_batch(&params.urls, &outcome)),
        Err(e) => {
            tracing::warn!(code = e.code(), "batch extraction failed: {}", e);
            let message = e.to_string();
            let message = if message.is_empty() { "Unknown error occurred".to_string() } else { message };
            error_result(format!("{}\n\n{}", message, BATCH_TROUBLESHOOTING))
        }
    }
}

/// Render the outcome for `urls`, one block per requested URL.
pub fn render_batch(urls: &[String], outcome: &BatchOutcome) -> String {
    let header = format!("Content from {} webpages:\n\n", urls.len());

    let mut text = urls.iter().fold(header, |mut text, url| {
        let _ = writeln!(text, "URL: {}", url);
        match outcome.get(url) {
            Some(Ok(content)) => render_entry(&mut text, content),
            Some(Err(message)) => {
                let _ = write!(text, "Error: {}\n\n", message);
            }
            None => text.push_str("Error: No result returned for this URL\n\n"),
        }
        text
    });

    text.push_str(BATCH_NOTE);
    text
}

fn render_entry(text: &mut String, content: &ExtractedContent) {
    let _ = writeln!(text, "Title: {}", content.title);
    if let Some(description) = &content.description {
        let _ = writeln!(text, "Description: {}", description);
    }
    let _ = writeln!(text, "Stats: {} words", content.stats.word_count);
    if let Some(summary) = &content.summary {
        let _ = writeln!(text, "Summary: {}", summary);
    }
    let preview = truncate_chars(&content.content_preview.first_500_chars, BATCH_PREVIEW_CHARS);
    let _ = write!(text, "Preview: {}...\n\n", preview);
}
