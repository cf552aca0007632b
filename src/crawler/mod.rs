//! Crawler module for catalog page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and pacing
//! - HTML parsing with selector fallback chains
//! - Detail page extraction
//! - Paginated listing traversal
//! - Category discovery and overall crawl coordination

mod coordinator;
pub mod document;
mod extractor;
mod fetcher;
mod walker;

pub use coordinator::{discover_categories, CatalogCrawl};
pub use document::Document;
pub use extractor::{extract_details, ExtractError};
pub use fetcher::{build_http_client, HttpSession, RetryPolicy};
pub use walker::{read_listing, walk, ListingPage};

use crate::catalog::{BookRecord, CatalogRecord, SpeciesRecord};
use crate::config::{Config, SiteKind};
use crate::output::{CrawlReport, SheetData, SheetWriter, XlsxWorkbook};

/// Runs a complete crawl-and-persist cycle
///
/// This is the main entry point for a crawl. It will:
/// 1. Open the HTTP session
/// 2. Discover the site's categories
/// 3. Walk each category and write it to the workbook as soon as it is done
/// 4. Report what was written and what failed
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion; individual sheet
///   failures are listed in the report
/// * `Err(CrawlError)` - The crawl could not be started
pub async fn crawl_and_persist(config: &Config) -> crate::Result<CrawlReport> {
    let mut workbook = XlsxWorkbook::new(&config.output.workbook_path);

    let report = match config.site.kind {
        SiteKind::Books => {
            persist_crawl(CatalogCrawl::<BookRecord>::new(config)?, &mut workbook).await
        }
        SiteKind::Species => {
            persist_crawl(CatalogCrawl::<SpeciesRecord>::new(config)?, &mut workbook).await
        }
    };

    Ok(report)
}

/// Drains a crawl into a sheet writer, one sheet per category
///
/// A failed write is recorded and the remaining categories are still
/// attempted.
pub async fn persist_crawl<R, W>(mut crawl: CatalogCrawl<R>, writer: &mut W) -> CrawlReport
where
    R: CatalogRecord,
    W: SheetWriter,
{
    let mut report = CrawlReport::new();

    while let Some(category) = crawl.next_category().await {
        let sheet = SheetData::from_category(&category);
        report.record_category(&category);

        match writer.write_sheet(&sheet) {
            Ok(outcome) => {
                tracing::info!(
                    "Saved {} rows to sheet '{}' ({})",
                    sheet.rows.len(),
                    sheet.name,
                    outcome
                );
                report.record_sheet(&sheet, outcome);
            }
            Err(e) => {
                tracing::error!("Failed to save sheet '{}': {}", sheet.name, e);
                report.record_failure(&sheet, &e);
            }
        }
    }

    report
}
