//! `.xlsx` workbook writer
//!
//! Each write reopens the workbook from disk, so sheets written earlier in
//! the crawl (or by a previous run) are preserved.

use crate::output::traits::{OutputError, OutputResult, SheetData, SheetOutcome, SheetWriter};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// A workbook file on disk, one sheet per category
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    path: PathBuf,
}

impl XlsxWorkbook {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the sheets in the workbook, in workbook order
    pub fn sheet_names(&self) -> OutputResult<Vec<String>> {
        let book = self.open()?;
        Ok(book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect())
    }

    /// Reads every row of a sheet as text, header row included
    ///
    /// Returns `Ok(None)` if the sheet does not exist.
    pub fn read_sheet(&self, name: &str) -> OutputResult<Option<Vec<Vec<String>>>> {
        let book = self.open()?;
        let Some(sheet) = book.get_sheet_by_name(name) else {
            return Ok(None);
        };

        let rows = (1..=sheet.get_highest_row())
            .map(|row| {
                (1..=sheet.get_highest_column())
                    .map(|col| sheet.get_value((col, row)))
                    .collect()
            })
            .collect();

        Ok(Some(rows))
    }

    fn open(&self) -> OutputResult<Spreadsheet> {
        umya_spreadsheet::reader::xlsx::read(&self.path).map_err(|e| OutputError::Read {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, book: &Spreadsheet) -> OutputResult<()> {
        umya_spreadsheet::writer::xlsx::write(book, &self.path).map_err(|e| OutputError::Write {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl SheetWriter for XlsxWorkbook {
    fn write_sheet(&mut self, sheet: &SheetData) -> OutputResult<SheetOutcome> {
        let (mut book, created) = if self.path.exists() {
            (self.open()?, false)
        } else {
            (umya_spreadsheet::new_file_empty_worksheet(), true)
        };

        let outcome = if book.get_sheet_by_name(&sheet.name).is_some() {
            let worksheet = book
                .get_sheet_by_name_mut(&sheet.name)
                .ok_or_else(|| missing_sheet(&sheet.name))?;

            let mut next_row = worksheet.get_highest_row() + 1;
            if next_row == 1 {
                write_row(worksheet, 1, &sheet.columns);
                next_row = 2;
            }
            write_rows(worksheet, next_row, &sheet.rows);
            SheetOutcome::Appended
        } else {
            let worksheet = book
                .new_sheet(sheet.name.as_str())
                .map_err(|message| OutputError::Sheet {
                    name: sheet.name.clone(),
                    message: message.to_string(),
                })?;

            write_row(worksheet, 1, &sheet.columns);
            write_rows(worksheet, 2, &sheet.rows);

            if created {
                SheetOutcome::CreatedWorkbook
            } else {
                SheetOutcome::CreatedSheet
            }
        };

        self.save(&book)?;
        Ok(outcome)
    }
}

fn missing_sheet(name: &str) -> OutputError {
    OutputError::Sheet {
        name: name.to_string(),
        message: "sheet disappeared while writing".to_string(),
    }
}

/// Writes rows starting at the 1-based `first_row`
fn write_rows(worksheet: &mut Worksheet, first_row: u32, rows: &[Vec<String>]) {
    for (row, values) in (first_row..).zip(rows) {
        write_row(worksheet, row, values);
    }
}

/// Writes one row as text cells
fn write_row(worksheet: &mut Worksheet, row: u32, values: &[String]) {
    for (col, value) in (1u32..).zip(values) {
        worksheet
            .get_cell_mut((col, row))
            .set_value_string(value.as_str());
    }
}
