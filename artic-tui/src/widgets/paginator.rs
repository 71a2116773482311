//! Paginator: page navigation bounds and the "showing x to y" label.

use artic_lib::table::TableController;

/// Snapshot of the paging values the table was rendered with.
///
/// Navigation is bounded here, not by the controller. When the total is
/// unknown there is no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page: usize,
    pub first: usize,
    /// Rows the API returned for this page.
    pub fetched: usize,
    /// Rows left after the row filter; `None` when no filter is set.
    pub matching: Option<usize>,
    pub total: Option<u64>,
    pub page_count: Option<usize>,
}

impl Paginator {
    pub fn of(table: &TableController) -> Self {
        Self {
            page: table.page_index().get(),
            first: table.first_row(),
            fetched: table.fetched_count(),
            matching: table.row_filter().map(|_| table.records().len()),
            total: table.total_records(),
            page_count: table.page_count(),
        }
    }

    /// Target of "previous page", if there is one.
    pub fn prev(&self) -> Option<usize> {
        self.page.checked_sub(1)
    }

    /// Target of "next page", if there is one.
    pub fn next(&self) -> Option<usize> {
        match self.page_count {
            Some(count) if self.page + 1 >= count => None,
            _ => Some(self.page + 1),
        }
    }

    pub fn first_page(&self) -> Option<usize> {
        (self.page != 0).then_some(0)
    }

    pub fn last_page(&self) -> Option<usize> {
        let last = self.page_count?.checked_sub(1)?;
        (last != self.page).then_some(last)
    }

    /// Label for the table border.
    ///
    /// The row range always refers to the page as returned by the API; a
    /// filter only adds how many of those rows match.
    pub fn label(&self) -> String {
        let total = match self.total {
            Some(total) => total.to_string(),
            None => "?".to_string(),
        };
        let pages = match self.page_count {
            Some(count) => count.to_string(),
            None => "?".to_string(),
        };

        if self.fetched == 0 {
            return format!("No rows · Page {} of {}", self.page + 1, pages);
        }

        let range = format!("Showing {} to {} of {}", self.first + 1, self.first + self.fetched, total);
        let range = match self.matching {
            Some(matching) => format!("{}, {} match filter", range, matching),
            None => range,
        };
        format!("{} · Page {} of {}", range, self.page + 1, pages)
    }
}
