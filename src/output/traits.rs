//! Output writer traits and types
//!
//! This module defines the trait interface for sheet writers and the
//! sheet data handed to them.

use crate::catalog::{CatalogRecord, Category};
use crate::output::sheet_name::sheet_name_for;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to read workbook {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write workbook {path}: {message}")]
    Write { path: String, message: String },

    #[error("Invalid sheet '{name}': {message}")]
    Sheet { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One category flattened into a header and text rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    /// Sanitized sheet name
    pub name: String,

    /// Header row
    pub columns: Vec<String>,

    /// Data rows, each with one value per column
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    /// Flattens a category, one row per record in traversal order
    pub fn from_category<R: CatalogRecord>(category: &Category<R>) -> Self {
        Self {
            name: sheet_name_for(category),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: category
                .products()
                .iter()
                .map(|record| record.values().into_iter().map(str::to_string).collect())
                .collect(),
        }
    }
}

/// What a sheet write did to the workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// The workbook did not exist and was created with this sheet
    CreatedWorkbook,
    /// The workbook existed; the sheet was added to it
    CreatedSheet,
    /// The sheet existed; rows were appended below its last row
    Appended,
}

impl fmt::Display for SheetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatedWorkbook => write!(f, "new workbook"),
            Self::CreatedSheet => write!(f, "new sheet"),
            Self::Appended => write!(f, "appended"),
        }
    }
}

/// Trait for sheet persistence backends
///
/// # Contract
///
/// - Missing workbook: create it containing the sheet (header + rows)
/// - Existing sheet: append rows after its current last row, header untouched
/// - Existing workbook without the sheet: add the sheet (header + rows)
pub trait SheetWriter {
    /// Writes one sheet
    fn write_sheet(&mut self, sheet: &SheetData) -> OutputResult<SheetOutcome>;
}
