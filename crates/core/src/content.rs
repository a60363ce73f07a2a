//! Extracted webpage content types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum characters kept in [`ContentPreview::first_500_chars`].
pub const PREVIEW_CHARS: usize = 500;

/// Output format for extracted content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
        }
    }
}

/// Size statistics of the extracted content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub word_count: usize,
    pub approximate_chars: usize,
}

/// Leading slice of the extracted content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPreview {
    /// At most [`PREVIEW_CHARS`] characters.
    pub first_500_chars: String,
}

impl ContentPreview {
    /// Build a preview from the full content, truncating to [`PREVIEW_CHARS`] characters.
    pub fn from_content(content: &str) -> Self {
        Self { first_500_chars: truncate_chars(content, PREVIEW_CHARS).to_string() }
    }
}

/// Normalized content of a single webpage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stats: ContentStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub content_preview: ContentPreview,
}

/// Outcome of extracting one URL as part of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub url: String,
    pub result: Result<ExtractedContent, String>,
}

impl BatchItem {
    pub fn success(url: impl Into<String>, content: ExtractedContent) -> Self {
        Self { url: url.into(), result: Ok(content) }
    }

    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self { url: url.into(), result: Err(message.into()) }
    }
}

/// Per-URL outcomes of a batch extraction.
///
/// A failed URL is an `Err` entry; it never fails the batch as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    items: Vec<BatchItem>,
}

impl BatchOutcome {
    /// The outcome recorded for `url`, if any.
    pub fn get(&self, url: &str) -> Option<&Result<ExtractedContent, String>> {
        self.iter().find(|item| item.url == url).map(|item| &item.result)
    }

    /// Entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter()
    }

    pub fn failed(&self) -> usize {
        self.iter().filter(|item| item.result.is_err()).count()
    }
}

impl FromIterator<BatchItem> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = BatchItem>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// The first `max` characters of `s`, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(url: &str) -> ExtractedContent {
        ExtractedContent {
            url: url.into(),
            title: "Title".into(),
            description: None,
            stats: ContentStats { word_count: 2, approximate_chars: 11 },
            summary: None,
            content_preview: ContentPreview::from_content("hello world"),
        }
    }

    #[test]
    fn test_output_format_default_and_names() {
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
        let text: OutputFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(text.as_str(), "text");
        assert!(serde_json::from_str::<OutputFormat>("\"pdf\"").is_err());
    }

    #[test]
    fn test_truncate_chars_ascii() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 10), "ab");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語");
    }

    #[test]
    fn test_preview_caps_at_500_chars() {
        let long = "x".repeat(1200);
        let preview = ContentPreview::from_content(&long);
        assert_eq!(preview.first_500_chars.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_batch_outcome_lookup() {
        let outcome: BatchOutcome = vec![
            BatchItem::success("https://a.example", content("https://a.example")),
            BatchItem::failure("https://b.example", "HTTP_ERROR: status 404"),
        ]
        .into_iter()
        .collect();

        assert_eq!(outcome.iter().count(), 2);
        assert_eq!(outcome.failed(), 1);
        assert!(matches!(outcome.get("https://a.example"), Some(Ok(_))));
        assert_eq!(outcome.get("https://b.example"), Some(&Err("HTTP_ERROR: status 404".to_string())));
        assert!(outcome.get("https://c.example").is_none());
    }
}
