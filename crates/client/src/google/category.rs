//! Host-based categorization of search results.

use url::Url;

const REFERENCE: &[&str] = &["wikipedia.org", "britannica.com", "wiktionary.org", "merriam-webster.com"];
const VIDEO: &[&str] = &["youtube.com", "youtu.be", "vimeo.com", "dailymotion.com", "twitch.tv"];
const CODE: &[&str] = &["github.com", "gitlab.com", "bitbucket.org", "stackoverflow.com", "crates.io", "npmjs.com"];
const SOCIAL: &[&str] =
    &["twitter.com", "x.com", "reddit.com", "facebook.com", "linkedin.com", "instagram.com", "mastodon.social"];
const NEWS: &[&str] = &[
    "nytimes.com",
    "bbc.com",
    "bbc.co.uk",
    "cnn.com",
    "reuters.com",
    "theguardian.com",
    "apnews.com",
    "washingtonpost.com",
    "bloomberg.com",
    "npr.org",
];
const ACADEMIC: &[&str] =
    &["arxiv.org", "scholar.google.com", "researchgate.net", "nature.com", "sciencedirect.com", "ncbi.nlm.nih.gov"];
const DOCUMENTATION: &[&str] = &["readthedocs.io", "docs.rs", "developer.mozilla.org"];

/// Assign a coarse category label to a result link.
pub fn categorize(link: &str) -> &'static str {
    let Ok(url) = Url::parse(link) else {
        return "Other";
    };
    let Some(host) = url.host_str() else {
        return "Other";
    };
    let host = host.trim_start_matches("www.");

    if matches_any(host, REFERENCE) {
        "Reference"
    } else if matches_any(host, VIDEO) {
        "Video"
    } else if matches_any(host, CODE) {
        "Code"
    } else if matches_any(host, SOCIAL) {
        "Social"
    } else if matches_any(host, NEWS) || host.starts_with("news.") {
        "News"
    } else if matches_any(host, ACADEMIC) || host.ends_with(".edu") || host.contains(".ac.") {
        "Academic"
    } else if matches_any(host, DOCUMENTATION)
        || host.starts_with("docs.")
        || url.path().starts_with("/docs/")
        || url.path().contains("/documentation/")
    {
        "Documentation"
    } else {
        "Other"
    }
}

/// Exact host or subdomain match against a domain list.
fn matches_any(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_known_hosts() {
        assert_eq!(categorize("https://en.wikipedia.org/wiki/Rust"), "Reference");
        assert_eq!(categorize("https://www.youtube.com/watch?v=1"), "Video");
        assert_eq!(categorize("https://github.com/rust-lang/rust"), "Code");
        assert_eq!(categorize("https://old.reddit.com/r/rust"), "Social");
        assert_eq!(categorize("https://www.bbc.co.uk/news/1"), "News");
        assert_eq!(categorize("https://news.ycombinator.com/item?id=1"), "News");
        assert_eq!(categorize("https://arxiv.org/abs/1234.5678"), "Academic");
        assert_eq!(categorize("https://cs.stanford.edu/people"), "Academic");
        assert_eq!(categorize("https://docs.python.org/3/"), "Documentation");
        assert_eq!(categorize("https://example.com/docs/intro"), "Documentation");
    }

    #[test]
    fn test_categorize_fallbacks() {
        assert_eq!(categorize("https://example.com/blog"), "Other");
        assert_eq!(categorize("not a url"), "Other");
    }

    #[test]
    fn test_suffix_match_requires_label_boundary() {
        assert_eq!(categorize("https://notgithub.com/x"), "Other");
    }
}
