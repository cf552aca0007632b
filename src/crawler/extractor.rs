//! Detail page extraction
//!
//! A broken detail page must cost one row, never the crawl: every failure
//! here degrades to an empty record that still carries the page link.

use crate::catalog::CatalogRecord;
use crate::crawler::HttpSession;
use crate::FetchError;
use thiserror::Error;

/// Reasons a detail page produced no record
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to fetch detail page: {0}")]
    Fetch(#[from] FetchError),

    #[error("Expected container '{selector}' not found")]
    MissingContainer { selector: &'static str },
}

/// Fetches a detail page and extracts one record from it
///
/// Never fails: on any error the error is logged and `R::empty(url)` is
/// returned, with an empty id and every field empty except the link.
///
/// # Arguments
///
/// * `session` - The crawl's HTTP session
/// * `url` - Absolute URL of the detail page
pub async fn extract_details<R: CatalogRecord>(session: &HttpSession, url: &str) -> R {
    match try_extract_details(session, url).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Error occurred while getting details from {}: {}", url, e);
            R::empty(url)
        }
    }
}

async fn try_extract_details<R: CatalogRecord>(
    session: &HttpSession,
    url: &str,
) -> Result<R, ExtractError> {
    let document = session.fetch(url).await?;
    let id = R::detail_id(url).unwrap_or_default();

    R::extract(&document, id, url)
}
