//! Parsed HTML documents with selector fallback chains
//!
//! Catalog markup drifts between pages of the same site, so every query takes
//! an ordered list of CSS selectors and returns the first non-empty match.
//! Queries never fail: a miss is logged and reported as an empty result.

use scraper::{ElementRef, Html, Selector};

/// A fetched page, parsed and ready for selector queries
pub struct Document {
    url: String,
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url).finish()
    }
}

impl Document {
    /// Parses an HTML body fetched from `url`
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(body),
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns every element matched by the first selector that matches anything
    ///
    /// # Arguments
    ///
    /// * `candidates` - CSS selectors in priority order
    ///
    /// # Returns
    ///
    /// The matches of the first productive selector, or an empty vector
    /// (with a warning) if none matched
    pub fn select(&self, candidates: &[&str]) -> Vec<ElementRef<'_>> {
        for selector in candidates.iter().filter_map(|css| parse_selector(css)) {
            let elements: Vec<_> = self.html.select(&selector).collect();
            if !elements.is_empty() {
                return elements;
            }
        }

        tracing::warn!(
            "No elements found for selectors {:?} in {}",
            candidates,
            self.url
        );
        Vec::new()
    }

    /// Returns the first element matched by the first selector that matches anything
    pub fn select_one(&self, candidates: &[&str]) -> Option<ElementRef<'_>> {
        for selector in candidates.iter().filter_map(|css| parse_selector(css)) {
            if let Some(element) = self.html.select(&selector).next() {
                return Some(element);
            }
        }

        tracing::warn!(
            "No element found for selectors {:?} in {}",
            candidates,
            self.url
        );
        None
    }
}

/// Fallback-chain query scoped to the subtree under `element`
///
/// Misses are silent here; callers treat them as empty fields.
pub fn select_within<'a>(element: ElementRef<'a>, candidates: &[&str]) -> Vec<ElementRef<'a>> {
    for selector in candidates.iter().filter_map(|css| parse_selector(css)) {
        let elements: Vec<_> = element.select(&selector).collect();
        if !elements.is_empty() {
            return elements;
        }
    }
    Vec::new()
}

/// First match of [`select_within`]
pub fn select_one_within<'a>(element: ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    select_within(element, candidates).into_iter().next()
}

/// All text under an element, with runs of whitespace collapsed and the ends trimmed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first following sibling element with the given tag name
pub fn next_sibling_named<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == tag)
}

/// The value cell of the table row whose header contains `header`
///
/// Header matching is a case-sensitive substring test on the `th` text.
pub fn table_value(table: ElementRef<'_>, header: &str) -> String {
    let (Some(rows), Some(th), Some(td)) = (
        parse_selector("tr"),
        parse_selector("th"),
        parse_selector("td"),
    ) else {
        return String::new();
    };

    table
        .select(&rows)
        .find(|row| {
            row.select(&th)
                .next()
                .is_some_and(|cell| element_text(&cell).contains(header))
        })
        .and_then(|row| row.select(&td).next())
        .map(|cell| element_text(&cell))
        .unwrap_or_default()
}

/// The `dd` following the first `dt` whose text contains any of `terms`
pub fn definition_value(list: ElementRef<'_>, terms: &[&str]) -> String {
    let Some(dt) = parse_selector("dt") else {
        return String::new();
    };

    list.select(&dt)
        .find(|entry| {
            let text = element_text(entry);
            terms.iter().any(|term| text.contains(term))
        })
        .and_then(|entry| next_sibling_named(entry, "dd"))
        .map(|value| element_text(&value))
        .unwrap_or_default()
}

/// The first class token of `element` accepted by `pick`
pub fn class_token<F>(element: ElementRef<'_>, pick: F) -> Option<String>
where
    F: Fn(&str) -> Option<&str>,
{
    element.value().classes().find_map(|class| pick(class).map(str::to_string))
}

/// Parses a CSS selector, logging and discarding invalid ones
fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}
