//! Paginated listing traversal
//!
//! Walks a category's listing pages in order, extracting every detail page
//! they link to, until a page has no "next" link.

use crate::catalog::{CatalogRecord, Category, SiteLayout};
use crate::crawler::document::{element_text, select_within};
use crate::crawler::{extract_details, Document, HttpSession};
use crate::url::resolve_within;
use crate::CrawlError;
use std::collections::HashSet;

/// Links read from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Detail page hrefs, as written in the page
    pub detail_links: Vec<String>,

    /// The "next page" href, if the pager has one
    pub next_link: Option<String>,
}

/// Walks every listing page of a category, appending one record per item
///
/// # Walk Loop
///
/// 1. Fetch the page at `category.link()`
/// 2. Resolve each listing item's href against that page and extract it;
///    items whose href escapes the site root are skipped
/// 3. Find the pager's "next" link
/// 4. If there is one, advance `category.link()` to it and repeat
///
/// A fetch failure, an unresolvable next link or a next link to a page
/// already walked in this call ends the walk; the records gathered so far
/// are kept. Records are never de-duplicated.
///
/// # Returns
///
/// The same category, with its link on the last page walked
pub async fn walk<R: CatalogRecord>(
    session: &HttpSession,
    mut category: Category<R>,
) -> Category<R> {
    let mut pages = 0;
    let mut visited = HashSet::from([category.link().to_string()]);

    loop {
        pages += 1;
        tracing::debug!("Walking {} page {}: {}", category.name(), pages, category.link());

        match walk_page(session, &mut category).await {
            Ok(Some(next)) if visited.contains(&next) => {
                tracing::warn!(
                    "Pager of {} links back to already walked page {}, stopping",
                    category.link(),
                    next
                );
                break;
            }
            Ok(Some(next)) => {
                visited.insert(next.clone());
                category.set_link(next);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(
                    "Error occurred while walking category '{}': {}",
                    category.name(),
                    e
                );
                break;
            }
        }
    }

    tracing::info!(
        "Category '{}': {} records from {} pages",
        category.name(),
        category.products().len(),
        pages
    );

    category
}

/// Processes the listing page at `category.link()`
///
/// Returns the resolved next page URL, if any.
async fn walk_page<R: CatalogRecord>(
    session: &HttpSession,
    category: &mut Category<R>,
) -> Result<Option<String>, CrawlError> {
    let listing = {
        let document = session.fetch(category.link()).await?;
        read_listing(&document, &R::LAYOUT)
    };

    for href in &listing.detail_links {
        let url = match resolve_within(category.link(), href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping listing item '{}': {}", href, e);
                continue;
            }
        };

        let record = extract_details::<R>(session, url.as_str()).await;
        category.add_product(record);
    }

    match listing.next_link {
        Some(href) => Ok(Some(resolve_within(category.link(), &href)?.to_string())),
        None => Ok(None),
    }
}

/// Reads item links and the next page link from a listing page
pub fn read_listing(document: &Document, layout: &SiteLayout) -> ListingPage {
    let detail_links = document
        .select(layout.listing_items)
        .into_iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| is_followable(href))
        .map(str::to_string)
        .collect();

    let next_link = document.select_one(layout.pager).and_then(|pager| {
        select_within(pager, &["a[href]"])
            .into_iter()
            .find(|anchor| {
                let text = element_text(anchor).to_lowercase();
                layout
                    .next_labels
                    .iter()
                    .any(|label| text.contains(&label.to_lowercase()))
            })
            .and_then(|anchor| anchor.value().attr("href"))
            .filter(|href| is_followable(href))
            .map(str::to_string)
    });

    ListingPage {
        detail_links,
        next_link,
    }
}

/// Returns false for hrefs that never lead to a page
///
/// - empty hrefs and same-page fragments
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
fn is_followable(href: &str) -> bool {
    let href = href.trim();

    !(href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:"))
}
