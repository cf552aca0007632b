//! Sheet name rules

use crate::catalog::Category;

/// Characters a spreadsheet sheet name may not contain
pub const FORBIDDEN_CHARS: &[char] = &['/', '\\', '*', '?', ':', '[', ']'];

/// Longest allowed sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Strips forbidden characters and truncates to 31 characters
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// Sheet name for a category, `category_<id>` when nothing usable is left
pub fn sheet_name_for<R>(category: &Category<R>) -> String {
    let name = sanitize_sheet_name(category.name());
    if name.trim().is_empty() {
        format!("category_{}", category.id())
    } else {
        name
    }
}
