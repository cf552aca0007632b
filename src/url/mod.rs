//! URL handling module for Catalog-Crawl
//!
//! Links scraped from catalog pages are untrusted input. Every relative link
//! is resolved through [`resolve_within`], which refuses links that would walk
//! above the directory tree of the page they were found on.

mod resolve;

pub use resolve::resolve_within;

/// Parses a numeric identifier out of a URL with a single-group pattern
///
/// Returns `None` if the pattern does not match or the captured group is not
/// a number that fits in `u32`.
pub fn capture_number(pattern: &regex::Regex, url: &str) -> Option<u32> {
    capture_text(pattern, url)?.parse().ok()
}

/// Returns the first capture group of `pattern` in `url`
pub fn capture_text(pattern: &regex::Regex, url: &str) -> Option<String> {
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
