//! Query types for the artworks endpoint.
//!
//! - [`PageIndex`] - zero-based page index and its one-based page number
//! - [`Page`] - a page of artworks with the reported total
//! - [`PageQuery`] - optional query parameters and URL generation
//! - [`RowFilter`] - client-side numeric row predicate

mod filter;
mod page;
mod params;

pub use filter::RowFilter;
pub use page::Page;
pub use page::PageIndex;
pub use params::PageQuery;
