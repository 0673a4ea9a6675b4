//! Display helpers for the catalog table.

use crate::types::Artwork;
use std::fmt::Display;

/// Placeholder shown for missing cell values.
pub const EMPTY_CELL: &str = "-";

/// Format a count with en-US thousands separators (`129884` -> `129,884`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Text for one table cell; missing and empty values render as `-`.
pub fn render_cell_text<T: Display>(value: Option<T>) -> String {
    match value.map(|v| v.to_string()) {
        Some(text) if !text.is_empty() => text,
        _ => EMPTY_CELL.to_string(),
    }
}

/// Cells of one artwork row, in column order.
pub fn artwork_cells(artwork: &Artwork) -> [String; 6] {
    [
        render_cell_text(artwork.title.as_deref()),
        render_cell_text(artwork.place_of_origin.as_deref()),
        render_cell_text(artwork.artist_display.as_deref()),
        render_cell_text(artwork.inscriptions.as_deref()),
        render_cell_text(artwork.date_start),
        render_cell_text(artwork.date_end),
    ]
}

/// First and last 1-based entry numbers shown on `page`.
pub fn entry_range(page: u32, page_size: u32, total_records: u64) -> (u64, u64) {
    if total_records == 0 {
        return (0, 0);
    }
    let page = u64::from(page.max(1));
    let size = u64::from(page_size);
    let first = ((page - 1) * size + 1).min(total_records);
    let last = (page * size).min(total_records);
    (first, last)
}

/// "Showing 13 to 24 of 37 entries".
pub fn entry_summary(page: u32, page_size: u32, total_records: u64) -> String {
    let (first, last) = entry_range(page, page_size, total_records);
    format!(
        "Showing {} to {} of {} entries",
        format_count(first),
        format_count(last),
        format_count(total_records)
    )
}

/// Up to five page links, starting two before the current page.
pub fn visible_pages(current_page: u32, total_pages: u32) -> Vec<u32> {
    let start = current_page.saturating_sub(2).max(1);
    let end = total_pages.min(start.saturating_add(4));
    (start..=end).collect()
}
