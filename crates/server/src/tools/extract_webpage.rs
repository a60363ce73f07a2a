//! extract_webpage_content tool implementation.

use std::fmt::Write as _;

use gsearch_core::{ContentExtractor, Error, ExtractedContent, OutputFormat};
use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{error_result, text_result};

pub const PREVIEW_NOTE: &str = "Note: This is a preview of the content. For specific information, please ask about particular aspects of this webpage.";

pub const TROUBLESHOOTING: &str = "Common issues:\n- Check if the URL is accessible in a browser\n- Ensure the webpage is public\n- Try again if it's a temporary network issue";

/// Input parameters for the extract_webpage_content tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractWebpageParams {
    /// Full URL of the webpage to extract content from (must start with http:// or https://). Ensure the URL is from a public webpage and not behind authentication.
    pub url: String,

    /// Output format for the extracted content. Options: "markdown" (default), "html", or "text".
    #[serde(default)]
    pub format: OutputFormat,
}

/// Reject anything that is not an absolute http(s) URL.
pub(crate) fn validate_http_url(raw: &str) -> Result<(), Error> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(Error::InvalidUrl(format!("URL must start with http:// or https://: {}", raw))),
    }
}

pub async fn extract_impl(extractor: &dyn ContentExtractor, params: &ExtractWebpageParams) -> CallToolResult {
    if let Err(e) = validate_http_url(&params.url) {
        return error_result(e.to_string());
    }

    tracing::debug!(url = %params.url, format = params.format.as_str(), "extract_webpage_content");

    match extractor.extract_content(&params.url, params.format).await {
        Ok(content) => text_result(render_content(&content)),
        Err(e) => {
            tracing::warn!(url = %params.url, code = e.code(), "extraction failed: {}", e);
            let message = e.to_string();
            let message = if message.is_empty() { "Unknown error occurred".to_string() } else { message };
            error_result(format!("{}\n\n{}", message, TROUBLESHOOTING))
        }
    }
}

/// Render one page with its full preview.
pub fn render_content(content: &ExtractedContent) -> String {
    let mut text = format!("Content from: {}\n\nTitle: {}\n", content.url, content.title);

    if let Some(description) = &content.description {
        let _ = writeln!(text, "Description: {}", description);
    }

    let _ = write!(
        text,
        "\nStats: {} words, {} characters\n\n",
        content.stats.word_count, content.stats.approximate_chars
    );

    if let Some(summary) = &content.summary {
        let _ = write!(text, "Summary: {}\n\n", summary);
    }

    let _ = write!(text, "Content Preview:\n{}\n\n", content.content_preview.first_500_chars);
    text.push_str(PREVIEW_NOTE);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fakes::{FakeExtractor, is_error, page, result_text};

    fn params(url: &str) -> ExtractWebpageParams {
        serde_json::from_value(serde_json::json!({ "url": url })).unwrap()
    }

    #[test]
    fn test_format_defaults_to_markdown() {
        assert_eq!(params("https://a.example").format, OutputFormat::Markdown);

        let params: ExtractWebpageParams =
            serde_json::from_value(serde_json::json!({ "url": "https://a.example", "format": "text" })).unwrap();
        assert_eq!(params.format, OutputFormat::Text);
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://example.com/a").is_ok());
        assert!(validate_http_url("http://example.com").is_ok());
        assert!(matches!(validate_http_url("ftp://example.com"), Err(Error::InvalidUrl(_))));
        assert!(matches!(validate_http_url("example.com"), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_render_full_page() {
        let fake = FakeExtractor::default().with_page(page("https://a.example/", "Page A", "Alpha body text"));
        let result = extract_impl(&fake, &params("https://a.example/")).await;

        assert!(!is_error(&result));
        assert_eq!(
            result_text(&result),
            "Content from: https://a.example/\n\n\
             Title: Page A\n\
             Description: About Page A\n\
             \nStats: 3 words, 15 characters\n\n\
             Summary: Summary of Page A.\n\n\
             Content Preview:\nAlpha body text\n\n\
             Note: This is a preview of the content. For specific information, please ask about particular aspects of this webpage."
        );
    }

    #[tokio::test]
    async fn test_optional_fields_omitted() {
        let mut content = page("https://a.example/", "Page A", "Alpha");
        content.description = None;
        content.summary = None;
        let fake = FakeExtractor::default().with_page(content);

        let text = result_text(&extract_impl(&fake, &params("https://a.example/")).await);
        assert!(!text.contains("Description:"));
        assert!(!text.contains("Summary:"));
        assert!(text.contains("Title: Page A\n\nStats: 1 words, 5 characters\n\nContent Preview:\nAlpha\n\n"));
    }

    #[tokio::test]
    async fn test_single_preview_not_truncated_further() {
        let body = "x".repeat(500);
        let fake = FakeExtractor::default().with_page(page("https://a.example/", "Long", &body));

        let text = result_text(&extract_impl(&fake, &params("https://a.example/")).await);
        assert!(text.contains(&format!("Content Preview:\n{}\n\n", body)));
    }

    #[tokio::test]
    async fn test_default_format_reaches_collaborator() {
        let fake = FakeExtractor::default().with_page(page("https://a.example/", "A", "a"));
        extract_impl(&fake, &params("https://a.example/")).await;

        let calls = fake.single_calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(vec!["https://a.example/".to_string()], OutputFormat::Markdown)]);
    }

    #[tokio::test]
    async fn test_failure_includes_troubleshooting() {
        let fake = FakeExtractor::default();
        let result = extract_impl(&fake, &params("https://missing.example/")).await;

        assert!(is_error(&result));
        let text = result_text(&result);
        assert!(text.starts_with("HTTP_ERROR: status 404 for https://missing.example/\n\nCommon issues:\n"));
        assert!(text.ends_with("- Try again if it's a temporary network issue"));
    }

    #[tokio::test]
    async fn test_non_http_url_rejected_without_call() {
        let fake = FakeExtractor::default();
        let result = extract_impl(&fake, &params("file:///etc/passwd")).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("INVALID_URL"));
        assert_eq!(fake.call_count(), 0);
    }
}
