//! Artworks API operations

pub mod query;
mod source;

pub use source::*;
