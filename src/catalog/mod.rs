//! Catalog data model
//!
//! A crawl produces [`Category`] values, each owning the records extracted
//! from the detail pages listed under it. Two record types exist, one per
//! supported site layout; they share no base type, only the
//! [`CatalogRecord`] trait that the crawler is generic over.

mod book;
mod species;

pub use book::{BookFields, BookRecord};
pub use species::{SpeciesFields, SpeciesRecord};

use crate::crawler::{Document, ExtractError};

/// Selector fallback chains and labels describing one site's markup
///
/// Each chain is tried in order and the first selector that matches anything
/// wins, so a new page variant is supported by adding a selector here rather
/// than touching the crawl logic.
#[derive(Debug, Clone, Copy)]
pub struct SiteLayout {
    /// Anchors on the index page that lead to a category listing
    pub category_links: &'static [&'static str],

    /// Anchors on a listing page that lead to a detail page
    pub listing_items: &'static [&'static str],

    /// The pagination control on a listing page
    pub pager: &'static [&'static str],

    /// Link texts that mark the "next page" anchor inside the pager
    pub next_labels: &'static [&'static str],
}

/// A record type that can be extracted from a detail page
pub trait CatalogRecord: Sized + std::fmt::Debug {
    /// Column headers, in the order returned by [`CatalogRecord::values`]
    const COLUMNS: &'static [&'static str];

    /// Markup of the site this record type is scraped from
    const LAYOUT: SiteLayout;

    /// Parses the category id out of a category listing URL
    ///
    /// Index entries whose link yields `None` are not categories.
    fn category_id(link: &str) -> Option<u32>;

    /// Parses the record id out of a detail page URL
    fn detail_id(url: &str) -> Option<String>;

    /// Extracts a record from a parsed detail page
    ///
    /// Individual field misses produce empty strings; an error is returned
    /// only when the page is not a detail page at all.
    fn extract(document: &Document, id: String, url: &str) -> Result<Self, ExtractError>;

    /// The record written when a detail page cannot be extracted
    fn empty(url: &str) -> Self;

    fn id(&self) -> &str;

    fn link(&self) -> &str;

    /// Field values in column order
    fn values(&self) -> Vec<&str>;

    /// True if every field except the link is empty
    fn is_empty(&self) -> bool {
        Self::COLUMNS
            .iter()
            .zip(self.values())
            .filter(|(column, _)| **column != "link")
            .all(|(_, value)| value.is_empty())
    }
}

/// One catalog section and the records extracted from it
///
/// `link` is the listing page the crawl is currently on and advances as
/// pagination proceeds. `products` only ever grows, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct Category<R> {
    id: u32,
    name: String,
    link: String,
    products: Vec<R>,
}

impl<R> Category<R> {
    /// Creates a category with no products; the name is trimmed
    pub fn new(id: u32, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            link: link.into(),
            products: Vec::new(),
        }
    }

    /// The placeholder yielded when category discovery fails
    pub fn sentinel() -> Self {
        Self::new(0, "", "")
    }

    /// Returns true for the discovery-failure placeholder
    pub fn is_sentinel(&self) -> bool {
        self.id == 0 && self.name.is_empty() && self.link.is_empty()
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn products(&self) -> &[R] {
        &self.products
    }

    pub(crate) fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    pub(crate) fn add_product(&mut self, product: R) {
        self.products.push(product);
    }
}
