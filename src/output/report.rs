//! End-of-run crawl report
//!
//! Collects what each category yielded and what happened to its sheet, and
//! prints a summary once the crawl is over.

use crate::catalog::{CatalogRecord, Category};
use crate::output::traits::{OutputError, SheetData, SheetOutcome};

/// A sheet that was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSheet {
    pub name: String,
    pub outcome: SheetOutcome,
    pub rows: usize,
}

/// A sheet that could not be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSheet {
    pub name: String,
    pub rows: usize,
    pub message: String,
}

/// Summary of one crawl-and-persist run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Number of categories yielded by the crawl (sentinel included)
    pub categories: usize,

    /// Total records across all categories
    pub records: usize,

    /// Records whose detail page could not be extracted
    pub empty_records: usize,

    /// Sheets written, in write order
    pub saved: Vec<SavedSheet>,

    /// Sheets whose write failed, in write order
    pub failed: Vec<FailedSheet>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished category and its records
    pub fn record_category<R: CatalogRecord>(&mut self, category: &Category<R>) {
        self.categories += 1;
        self.records += category.products().len();
        self.empty_records += category
            .products()
            .iter()
            .filter(|record| record.is_empty())
            .count();
    }

    pub fn record_sheet(&mut self, sheet: &SheetData, outcome: SheetOutcome) {
        self.saved.push(SavedSheet {
            name: sheet.name.clone(),
            outcome,
            rows: sheet.rows.len(),
        });
    }

    pub fn record_failure(&mut self, sheet: &SheetData, error: &OutputError) {
        self.failed.push(FailedSheet {
            name: sheet.name.clone(),
            rows: sheet.rows.len(),
            message: error.to_string(),
        });
    }

    /// Returns true if every sheet was written
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Rows that made it into the workbook
    pub fn rows_saved(&self) -> usize {
        self.saved.iter().map(|sheet| sheet.rows).sum()
    }
}

/// Prints the report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
/// * `workbook` - Path of the workbook the sheets were written to
pub fn print_report(report: &CrawlReport, workbook: &str) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Categories crawled: {}", report.categories);
    println!("  Records extracted: {}", report.records);
    println!("  Empty records: {}", report.empty_records);
    println!("  Workbook: {}", workbook);
    println!();

    if !report.saved.is_empty() {
        println!("Sheets Saved ({}):", report.saved.len());
        for sheet in &report.saved {
            println!("  - {}: {} rows ({})", sheet.name, sheet.rows, sheet.outcome);
        }
        println!();
    }

    if !report.failed.is_empty() {
        println!("Sheets Failed ({}):", report.failed.len());
        for sheet in &report.failed {
            println!("  - {}: {} rows lost: {}", sheet.name, sheet.rows, sheet.message);
        }
        println!();
    }

    let extracted = report.records - report.empty_records;
    let success_rate = if report.records > 0 {
        (extracted as f64 / report.records as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} records extracted)",
        success_rate, extracted, report.records
    );
}
