//! Page metadata harvested from the raw HTML head.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"], meta[name="Description"], meta[property="og:description"]"#)
        .expect("valid selector")
});
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("valid selector"));

/// Metadata read directly from the document, independent of readability scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Read `<title>` and the first non-empty description meta tag.
///
/// `<meta name="description">` wins over `og:description` when both are present.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|t| !t.is_empty());

    let mut named = None;
    let mut open_graph = None;
    for element in document.select(&DESCRIPTION) {
        let Some(content) = element.value().attr("content").map(collapse_whitespace) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        if element.value().attr("property").is_some() {
            open_graph.get_or_insert(content);
        } else {
            named.get_or_insert(content);
        }
    }

    PageMetadata { title, description: named.or(open_graph) }
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
