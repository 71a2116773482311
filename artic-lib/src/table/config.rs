//! Table configuration

use crate::api::query::RowFilter;

/// Rows per page. The API's default page size; no `limit` is ever sent, so
/// the first-row offset always matches the rows returned.
pub const ROWS_PER_PAGE: usize = 12;

/// What happens to the selection when the page changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionScope {
    /// Never cleared automatically. Records selected on earlier pages stay
    /// in the selection (and in the count) after navigating away.
    #[default]
    Retain,
    /// Cleared every time the page index changes.
    Page,
}

/// Configuration for a [`TableController`](super::TableController).
///
/// # Example
///
/// ```
/// use artic_lib::table::{SelectionScope, TableConfig};
///
/// let config = TableConfig::default()
///     .with_selection_scope(SelectionScope::Page);
/// assert!(config.row_filter.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Selection behaviour across page changes.
    ///
    /// Default: [`SelectionScope::Retain`]
    pub selection_scope: SelectionScope,

    /// Filter applied to each fetched page before it is stored.
    ///
    /// Default: none
    pub row_filter: Option<RowFilter>,
}

impl TableConfig {
    /// Sets the selection scope.
    pub fn with_selection_scope(mut self, scope: SelectionScope) -> Self {
        self.selection_scope = scope;
        self
    }
}
