//! Candidate domain extraction from free text.
//!
//! A heuristic scanner, not a URL grammar: it looks for `http://`, `https://`
//! or a `www` prefix and captures the first `label.label` token that ends at
//! whitespace, a slash, or the end of the text. Misses and spurious hits only
//! widen or narrow the secondary spam check.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://|www?)\S*?([a-z0-9\-]+\.[a-z0-9\-]+)(?:\s|$|/)").unwrap()
});

/// Extracts candidate domains from `text`.
///
/// Results are lower-cased, deduplicated, and kept in order of first
/// appearance.
///
/// # Examples
///
/// ```
/// use shortgate::utils::domain_extractor::extract_domains;
///
/// let domains = extract_domains("see http://www.Example.com/x and www.other.org");
/// assert_eq!(domains, vec!["example.com", "other.org"]);
/// ```
pub fn extract_domains(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    DOMAIN_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}
