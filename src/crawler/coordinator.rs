//! Crawler coordinator - category discovery and per-category orchestration
//!
//! [`CatalogCrawl`] is a lazy, forward-only sequence of finished categories.
//! Each call to [`CatalogCrawl::next_category`] walks exactly one category,
//! so a consumer can persist results while the crawl is still running, or
//! stop early by dropping the crawl.

use crate::catalog::{CatalogRecord, Category};
use crate::config::Config;
use crate::crawler::document::element_text;
use crate::crawler::{walk, HttpSession};
use crate::url::resolve_within;
use crate::{CrawlError, UrlError};
use std::collections::VecDeque;
use url::Url;

enum Phase<R> {
    /// Categories not discovered yet
    Pending,
    /// Discovered categories still to be walked, in index order
    Walking(VecDeque<Category<R>>),
    /// Nothing more will be yielded
    Done,
}

/// One crawl of a catalog site
///
/// Owns the HTTP session for the crawl's duration. The session is released
/// as soon as the last category has been yielded, when discovery fails, or
/// when the crawl is dropped before it is exhausted.
pub struct CatalogCrawl<R> {
    session: Option<HttpSession>,
    index_url: String,
    phase: Phase<R>,
}

impl<R: CatalogRecord> CatalogCrawl<R> {
    /// Creates a crawl of the site described by `config`
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogCrawl)` - Ready to yield categories
    /// * `Err(CrawlError)` - The index URL is invalid or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let index_url = Url::parse(&config.site.base_url)
            .and_then(|base| base.join(&config.site.index_path))
            .map_err(|e| UrlError::Parse(format!("index URL: {}", e)))?;

        let session = HttpSession::new(config)?;

        Ok(Self::with_session(session, index_url.as_str()))
    }

    /// Creates a crawl over an already opened session
    pub fn with_session(session: HttpSession, index_url: impl Into<String>) -> Self {
        Self {
            session: Some(session),
            index_url: index_url.into(),
            phase: Phase::Pending,
        }
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Returns true while the crawl still holds its HTTP session
    pub fn is_session_open(&self) -> bool {
        self.session.is_some()
    }

    /// Walks and returns the next category
    ///
    /// The first call discovers the categories. If discovery fails a single
    /// placeholder category ([`Category::sentinel`]) is returned and the
    /// crawl ends. Returns `None` once every category has been yielded.
    pub async fn next_category(&mut self) -> Option<Category<R>> {
        if matches!(self.phase, Phase::Pending) {
            if let Some(sentinel) = self.discover().await {
                return Some(sentinel);
            }
        }

        let Phase::Walking(queue) = &mut self.phase else {
            return None;
        };
        let next = queue.pop_front();
        let exhausted = queue.is_empty();

        let Some(category) = next else {
            self.finish();
            return None;
        };

        let category = match self.session.as_ref() {
            Some(session) => walk(session, category).await,
            None => category,
        };

        if exhausted {
            self.finish();
        }

        Some(category)
    }

    /// Runs discovery; returns the sentinel category if it failed
    async fn discover(&mut self) -> Option<Category<R>> {
        let result = match self.session.as_ref() {
            Some(session) => discover_categories::<R>(session, &self.index_url).await,
            None => Ok(Vec::new()),
        };

        match result {
            Ok(categories) => {
                tracing::info!(
                    "Discovered {} categories at {}",
                    categories.len(),
                    self.index_url
                );
                self.phase = Phase::Walking(categories.into());
                None
            }
            Err(e) => {
                tracing::error!("Error occurred while discovering categories: {}", e);
                self.finish();
                Some(Category::sentinel())
            }
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;
        if self.session.take().is_some() {
            tracing::debug!("Crawl of {} finished", self.index_url);
        }
    }
}

/// Reads the category index page
///
/// Entries without a name, without an href, or whose resolved link does not
/// carry a category id are skipped.
pub async fn discover_categories<R: CatalogRecord>(
    session: &HttpSession,
    index_url: &str,
) -> Result<Vec<Category<R>>, CrawlError> {
    let document = session.fetch(index_url).await?;
    let mut categories = Vec::new();

    for anchor in document.select(R::LAYOUT.category_links) {
        let name = element_text(&anchor);
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let link = match resolve_within(index_url, href) {
            Ok(link) => link.to_string(),
            Err(e) => {
                tracing::debug!("Skipping index entry '{}': {}", name, e);
                continue;
            }
        };

        match R::category_id(&link) {
            Some(id) if !name.is_empty() => categories.push(Category::new(id, name, link)),
            _ => tracing::debug!("Skipping index entry '{}' ({})", name, link),
        }
    }

    Ok(categories)
}
