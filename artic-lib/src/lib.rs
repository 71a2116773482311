//! Artworks API client library
//!
//! Fetches pages of the Art Institute of Chicago artworks listing and keeps
//! the state of a selectable, paginated table over them.

pub mod api;
pub mod error;
pub mod model;
pub mod table;

mod client;

pub use client::*;
