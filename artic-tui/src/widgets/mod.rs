//! Terminal widgets for the artwork table.

mod filter_popover;
mod paginator;
mod table;

pub use filter_popover::{FilterPopover, FilterSubmit};
pub use paginator::Paginator;
pub use table::ArtworkTable;
