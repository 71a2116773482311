//! Pagination controller: page index, total, current records and selection.

use log::debug;
use log::error;
use tokio_util::sync::CancellationToken;

use super::SelectionScope;
use super::ROWS_PER_PAGE;
use super::SelectionTracker;
use super::TableConfig;
use crate::api::PageSource;
use crate::api::query::Page;
use crate::api::query::PageIndex;
use crate::api::query::RowFilter;
use crate::error::Error;
use crate::model::Artwork;

/// Events emitted by the table widget.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The user moved to another page. `page` is zero-based; widgets that
    /// cannot determine it report `None`, which is ignored.
    Page { page: Option<usize> },
    /// The full set of rows the widget now considers selected.
    Selection(Vec<Artwork>),
}

/// Monotonically increasing id of a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the controller wants performed.
///
/// The controller never awaits the network itself; callers run the request
/// (typically on a spawned task) and hand the [`FetchOutcome`] back to
/// [`TableController::apply`].
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub index: PageIndex,
    /// Fired when a newer request supersedes this one.
    pub cancel: CancellationToken,
}

impl FetchRequest {
    /// Runs the request against `source`.
    pub async fn run<S: PageSource + ?Sized>(self, source: &S) -> FetchOutcome {
        let result = source.fetch_page_with_cancel(self.index, self.cancel).await;
        FetchOutcome {
            token: self.token,
            index: self.index,
            result,
        }
    }
}

/// The resolved result of a [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub token: RequestToken,
    pub index: PageIndex,
    pub result: Result<Page, Error>,
}

/// What [`TableController::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Records and total were replaced.
    Updated,
    /// The fetch failed; state is unchanged.
    Failed,
    /// A newer request was issued since; the outcome was dropped.
    Stale,
}

/// Owns the table state and turns widget events into fetch requests.
///
/// Only the most recently requested page is ever stored: every request gets
/// a fresh [`RequestToken`] and cancels the one before it, and outcomes
/// carrying an older token are discarded.
///
/// # Example
///
/// ```ignore
/// let mut table = TableController::new(TableConfig::default());
/// table.refresh(&client).await;
///
/// if let Some(request) = table.handle(TableEvent::Page { page: Some(3) }) {
///     let outcome = request.run(&client).await;
///     table.apply(outcome);
/// }
/// assert_eq!(table.first_row(), 36);
/// ```
#[derive(Debug)]
pub struct TableController {
    config: TableConfig,
    page_index: PageIndex,
    total_records: Option<u64>,
    records: Vec<Artwork>,
    /// Rows in the last applied page before the row filter.
    fetched: usize,
    selection: SelectionTracker,
    next_token: u64,
    latest: Option<RequestToken>,
    in_flight: Option<CancellationToken>,
}

impl TableController {
    /// Creates a controller on page 0 with a total of 0 and no records.
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            page_index: PageIndex::FIRST,
            total_records: Some(0),
            records: Vec::new(),
            fetched: 0,
            selection: SelectionTracker::new(),
            next_token: 0,
            latest: None,
            in_flight: None,
        }
    }

    /// Request for the initial page.
    pub fn start(&mut self) -> FetchRequest {
        self.request()
    }

    /// Dispatches a widget event.
    pub fn handle(&mut self, event: TableEvent) -> Option<FetchRequest> {
        match event {
            TableEvent::Page { page } => self.on_page_change(page),
            TableEvent::Selection(selected) => {
                self.on_selection_change(selected);
                None
            }
        }
    }

    /// Stores the new page index and returns the fetch it implies.
    ///
    /// Events without a page value, and events for the page already shown,
    /// change nothing.
    pub fn on_page_change(&mut self, page: Option<usize>) -> Option<FetchRequest> {
        let Some(page) = page else {
            debug!("Ignoring page event without a page value");
            return None;
        };

        let index = PageIndex::new(page);
        if index == self.page_index {
            return None;
        }

        self.page_index = index;
        if self.config.selection_scope == SelectionScope::Page {
            self.selection.clear();
        }
        Some(self.request())
    }

    /// Replaces the selection with what the widget reports.
    pub fn on_selection_change(&mut self, selected: Vec<Artwork>) {
        self.selection.on_selection_change(selected);
    }

    /// Sets or clears the row filter and refetches the current page so the
    /// filter takes effect.
    pub fn set_row_filter(&mut self, filter: Option<RowFilter>) -> FetchRequest {
        self.config.row_filter = filter;
        self.request()
    }

    /// Issues a request for the current page, superseding any in flight.
    pub fn request(&mut self) -> FetchRequest {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        let token = RequestToken(self.next_token);
        self.next_token += 1;
        let cancel = CancellationToken::new();

        self.latest = Some(token);
        self.in_flight = Some(cancel.clone());

        debug!("Requesting page {} ({})", self.page_index.page_number(), token);
        FetchRequest {
            token,
            index: self.page_index,
            cancel,
        }
    }

    /// Applies a resolved fetch.
    ///
    /// Failures are logged and leave records and total untouched.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        if self.latest != Some(outcome.token) {
            debug!(
                "Discarding stale result for page {} ({})",
                outcome.index.page_number(),
                outcome.token
            );
            return Applied::Stale;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(page) => {
                let total = page.total_count();
                let records = page.into_records();
                self.fetched = records.len();
                self.records = match &self.config.row_filter {
                    Some(filter) => filter.apply(records),
                    None => records,
                };
                self.total_records = total;
                Applied::Updated
            }
            Err(Error::Cancelled) => {
                debug!("Request {} was cancelled", outcome.token);
                Applied::Stale
            }
            Err(e) => {
                error!("Error fetching data: {}", e);
                Applied::Failed
            }
        }
    }

    /// Requests the current page, waits for it and applies it.
    pub async fn refresh<S: PageSource + ?Sized>(&mut self, source: &S) -> Applied {
        let outcome = self.request().run(source).await;
        self.apply(outcome)
    }

    pub fn page_index(&self) -> PageIndex {
        self.page_index
    }

    /// Offset of the first displayed row: `page_index * rows_per_page`.
    pub fn first_row(&self) -> usize {
        self.page_index.first_row(ROWS_PER_PAGE)
    }

    /// Total across all pages; `None` when the last response omitted it.
    pub fn total_records(&self) -> Option<u64> {
        self.total_records
    }

    /// Number of pages implied by the total, if known.
    pub fn page_count(&self) -> Option<usize> {
        let total = usize::try_from(self.total_records?).ok()?;
        Some(total.div_ceil(ROWS_PER_PAGE))
    }

    /// Rows of the current page, after the row filter.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Rows the last applied page had before the row filter.
    pub fn fetched_count(&self) -> usize {
        self.fetched
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn row_filter(&self) -> Option<RowFilter> {
        self.config.row_filter
    }

    /// Returns `true` while the latest request has not been applied.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
