//! Page type for paginated results.

use crate::model::Artwork;

/// One page of artworks together with the reported total.
///
/// # Example
///
/// ```ignore
/// let page = client.fetch_page(PageIndex::new(0)).await?;
///
/// for artwork in page.records() {
///     println!("{:?}", artwork.title);
/// }
///
/// if let Some(total) = page.total_count() {
///     println!("{} artworks in total", total);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    records: Vec<Artwork>,
    /// Zero-based index this page was requested for.
    index: PageIndex,
    /// `pagination.total` from the response, if present.
    total_count: Option<u64>,
}

impl Page {
    /// Creates a new page for the given index.
    pub fn new(index: PageIndex, records: Vec<Artwork>) -> Self {
        Self {
            records,
            index,
            total_count: None,
        }
    }

    /// Sets the total record count.
    pub fn with_total_count(mut self, count: u64) -> Self {
        self.total_count = Some(count);
        self
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }

    /// Returns the zero-based index this page was requested for.
    pub fn index(&self) -> PageIndex {
        self.index
    }

    /// Returns the total record count, if the API reported one.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Zero-based page index, as used by the table.
///
/// The API counts pages from one; [`PageIndex::page_number`] does the
/// translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    /// The first page.
    pub const FIRST: PageIndex = PageIndex(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based index.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Returns the one-based page number sent to the API.
    pub fn page_number(&self) -> usize {
        self.0 + 1
    }

    /// Returns the offset of this page's first row in the full result set.
    pub fn first_row(&self, rows_per_page: usize) -> usize {
        self.0 * rows_per_page
    }
}

impl std::fmt::Display for PageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
