//! Error types

mod api;

pub use api::*;

/// A failed page fetch.
///
/// Every variant is treated the same way by the table controller: logged and
/// otherwise ignored.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request failed or the response could not be used.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request was cancelled before it resolved.
    #[error("Request cancelled")]
    Cancelled,
}
