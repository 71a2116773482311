//! Front end error type.

use thiserror::Error;

/// Errors that stop the front end.
///
/// Fetch failures never reach this type; the table controller logs them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client error: {0}")]
    Client(#[from] artic_lib::error::ApiError),

    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("no cache directory available for logs")]
    NoCacheDir,
}
