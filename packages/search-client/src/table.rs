//! Sorting and paging of aggregated rows for display.

use npi_registry::{NormalizedRow, COLUMN_COUNT};
use std::cmp::Ordering;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Display-side view of the result rows.
///
/// Sorting reorders the table's own sequence; the rows themselves are never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<NormalizedRow>,
    ascending: [bool; COLUMN_COUNT],
    page: usize,
}

impl ResultTable {
    pub fn new(rows: Vec<NormalizedRow>) -> Self {
        Self {
            rows,
            ascending: [false; COLUMN_COUNT],
            page: 1,
        }
    }

    /// Replace the rows (new search results). Per-column toggle state is kept.
    pub fn set_rows(&mut self, rows: Vec<NormalizedRow>) {
        self.rows = rows;
        self.page = 1;
    }

    /// Toggle the sort direction of `column` and stable-sort by it.
    ///
    /// The first sort on a column is ascending. Pagination returns to page 1.
    /// Returns `None` for an out-of-range column.
    pub fn sort_by_column(&mut self, column: usize) -> Option<SortDirection> {
        let ascending = self.ascending.get_mut(column)?;
        *ascending = !*ascending;
        let direction = if *ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };

        self.rows.sort_by(|a, b| {
            let ord = compare_column(a, b, column);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        self.page = 1;

        Some(direction)
    }

    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages; at least 1 even when empty.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Move to `page`, clamped to `[1, page_count]`.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.page_count());
        self.page
    }

    pub fn page_rows(&self) -> &[NormalizedRow] {
        let start = ((self.page - 1) * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }
}

fn compare_column(a: &NormalizedRow, b: &NormalizedRow, column: usize) -> Ordering {
    a.field(column)
        .unwrap_or_default()
        .cmp(b.field(column).unwrap_or_default())
}
