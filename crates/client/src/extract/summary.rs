//! Statistics, summary and preview derived from extracted content.

use gsearch_core::ContentStats;
use gsearch_core::content::truncate_chars;

/// Upper bound on the summary length in characters.
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Word and character counts for formatted content.
pub fn content_stats(content: &str) -> ContentStats {
    ContentStats { word_count: content.split_whitespace().count(), approximate_chars: content.chars().count() }
}

/// Leading sentences of `text`, stopping before [`SUMMARY_MAX_CHARS`] is exceeded.
///
/// A first sentence longer than the limit is cut at a word boundary and given an ellipsis.
/// Returns `None` for blank input.
pub fn summarize(text: &str) -> Option<String> {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return None;
    }

    let mut summary = String::new();
    for sentence in sentences(&flat) {
        let needed = if summary.is_empty() { sentence.chars().count() } else { sentence.chars().count() + 1 };
        if summary.chars().count() + needed > SUMMARY_MAX_CHARS {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(sentence);
    }

    if summary.is_empty() {
        let cut = truncate_chars(&flat, SUMMARY_MAX_CHARS - 3);
        let cut = cut.rsplit_once(' ').map_or(cut, |(head, _)| head);
        summary = format!("{}...", cut.trim_end());
    }

    Some(summary)
}

/// Split on `.`, `!` or `?` followed by whitespace, keeping the terminator.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let bytes = rest.as_bytes();
        let end = bytes
            .windows(2)
            .position(|w| matches!(w[0], b'.' | b'!' | b'?') && w[1] == b' ')
            .map(|i| i + 1)
            .unwrap_or(rest.len());

        let (sentence, tail) = rest.split_at(end);
        rest = tail.trim_start();
        Some(sentence.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_stats() {
        let stats = content_stats("# Title\n\nThree little words");
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.approximate_chars, 27);
    }

    #[test]
    fn test_content_stats_counts_chars_not_bytes() {
        let stats = content_stats("héllo");
        assert_eq!(stats.approximate_chars, 5);
        assert_eq!(stats.word_count, 1);
    }

    #[test]
    fn test_summary_takes_leading_sentences() {
        let text = "Rust is fast. It is also safe! Does it have a GC? No.";
        assert_eq!(summarize(text).as_deref(), Some(text));
    }

    #[test]
    fn test_summary_stops_at_limit() {
        let sentence = format!("{}.", "word ".repeat(20).trim_end());
        let text = [sentence.as_str(); 10].join(" ");
        let summary = summarize(&text).unwrap();

        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
        assert!(summary.ends_with('.'));
        assert_eq!(summary.matches('.').count(), 2);
    }

    #[test]
    fn test_summary_long_first_sentence_truncated() {
        let text = "lorem ".repeat(100);
        let summary = summarize(&text).unwrap();
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
        assert!(!summary.contains("lorem lor..."));
    }

    #[test]
    fn test_summary_blank() {
        assert_eq!(summarize("  \n "), None);
    }

    #[test]
    fn test_summary_ignores_decimal_points() {
        let text = "Version 1.75 shipped. More later.";
        let first = sentences(text).next().unwrap();
        assert_eq!(first, "Version 1.75 shipped.");
    }
}
