//! Output module for persisting crawl results
//!
//! This module handles:
//! - Flattening categories into sheet rows
//! - Writing sheets into an `.xlsx` workbook, creating or appending
//! - Summarizing a run once it is over

mod report;
mod sheet_name;
mod traits;
mod workbook;

pub use report::{print_report, CrawlReport, FailedSheet, SavedSheet};
pub use sheet_name::{sanitize_sheet_name, sheet_name_for, MAX_SHEET_NAME_LEN};
pub use traits::{OutputError, OutputResult, SheetData, SheetOutcome, SheetWriter};
pub use workbook::XlsxWorkbook;
