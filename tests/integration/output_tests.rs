//! Integration tests for workbook persistence
//!
//! Exercises the create / add-sheet / append paths of the `.xlsx` writer
//! through its public interface.

use catalog_crawl::catalog::{BookRecord, CatalogRecord, Category};
use catalog_crawl::output::{
    sanitize_sheet_name, SheetData, SheetOutcome, SheetWriter, XlsxWorkbook, MAX_SHEET_NAME_LEN,
};
use tempfile::TempDir;

fn book_sheet(category_name: &str, ids: &[&str]) -> SheetData {
    let category = Category::<BookRecord>::new(7, category_name, "https://x/cat_7/index.html");
    let mut sheet = SheetData::from_category(&category);

    sheet.rows = ids
        .iter()
        .map(|id| {
            BookRecord::COLUMNS
                .iter()
                .map(|column| match *column {
                    "id" => id.to_string(),
                    "name" => format!("Book {}", id),
                    "link" => format!("https://x/book_{}/index.html", id),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();

    sheet
}

#[test]
fn test_first_write_creates_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("booklist_sample.xlsx");
    let mut workbook = XlsxWorkbook::new(&path);

    assert!(!path.exists());
    let outcome = workbook.write_sheet(&book_sheet("Travel", &["1", "2"])).unwrap();

    assert_eq!(outcome, SheetOutcome::CreatedWorkbook);
    assert!(path.exists());

    let rows = workbook.read_sheet("Travel").unwrap().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], BookRecord::COLUMNS.to_vec());
    assert_eq!(rows[1][1], "Book 1");
    assert_eq!(rows[2][11], "https://x/book_2/index.html");
}

#[test]
fn test_rewriting_a_sheet_appends_below_existing_rows() {
    let dir = TempDir::new().unwrap();
    let mut workbook = XlsxWorkbook::new(dir.path().join("out.xlsx"));

    workbook.write_sheet(&book_sheet("Travel", &["1", "2"])).unwrap();
    let outcome = workbook.write_sheet(&book_sheet("Travel", &["3", "4"])).unwrap();

    assert_eq!(outcome, SheetOutcome::Appended);

    let rows = workbook.read_sheet("Travel").unwrap().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], BookRecord::COLUMNS.to_vec());

    let ids: Vec<&str> = rows[1..].iter().map(|row| row[0].as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_other_sheets_survive_new_sheet() {
    let dir = TempDir::new().unwrap();
    let mut workbook = XlsxWorkbook::new(dir.path().join("out.xlsx"));

    workbook.write_sheet(&book_sheet("Travel", &["1"])).unwrap();
    let outcome = workbook.write_sheet(&book_sheet("Mystery", &["2", "3"])).unwrap();

    assert_eq!(outcome, SheetOutcome::CreatedSheet);
    assert_eq!(
        workbook.sheet_names().unwrap(),
        vec!["Travel".to_string(), "Mystery".to_string()]
    );
    assert_eq!(workbook.read_sheet("Travel").unwrap().unwrap().len(), 2);
    assert_eq!(workbook.read_sheet("Mystery").unwrap().unwrap().len(), 3);
}

#[test]
fn test_sheet_names_are_sanitized() {
    let dir = TempDir::new().unwrap();
    let mut workbook = XlsxWorkbook::new(dir.path().join("out.xlsx"));

    let sheet = book_sheet("Sci-Fi: Space/Time [Vol. 2]", &["1"]);
    assert_eq!(sheet.name, "Sci-Fi SpaceTime Vol. 2");

    workbook.write_sheet(&sheet).unwrap();
    assert!(workbook.read_sheet("Sci-Fi SpaceTime Vol. 2").unwrap().is_some());
}

#[test]
fn test_long_names_are_truncated() {
    let name = "Historical Fiction and Biographies of the Ages";
    let sheet = sanitize_sheet_name(name);

    assert_eq!(sheet.chars().count(), MAX_SHEET_NAME_LEN);
    assert!(name.starts_with(&sheet));
}
