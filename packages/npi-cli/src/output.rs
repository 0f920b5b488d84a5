//! Terminal rendering of result pages.

use colored::Colorize;
use console::{pad_str, Alignment};
use npi_registry::COLUMN_HEADERS;
use search_client::ResultTable;

/// Columns printed to the terminal, with widths. CSV export carries all of them.
const DISPLAY_COLUMNS: [(usize, usize); 6] = [(0, 10), (1, 6), (2, 28), (4, 16), (8, 14), (10, 30)];

/// Resolve a column by header, ignoring case and treating `-`/`_` as spaces.
pub fn column_index(name: &str) -> Option<usize> {
    let wanted = name.replace(['-', '_'], " ");
    COLUMN_HEADERS
        .iter()
        .position(|header| header.eq_ignore_ascii_case(wanted.trim()))
}

pub fn print_page(table: &ResultTable) {
    let header = DISPLAY_COLUMNS
        .iter()
        .map(|&(idx, width)| pad_str(COLUMN_HEADERS[idx], width, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.bold());

    for row in table.page_rows() {
        let line = DISPLAY_COLUMNS
            .iter()
            .map(|&(idx, width)| {
                pad_str(row.field(idx).unwrap_or_default(), width, Alignment::Left, Some("…"))
                    .into_owned()
            })
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }

    println!(
        "{}",
        format!(
            "Page {} of {} ({} rows)",
            table.page(),
            table.page_count(),
            table.len()
        )
        .dimmed()
    );
}
