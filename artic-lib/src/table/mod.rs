//! Table state: pagination, selection and configuration.

mod config;
mod controller;
mod selection;

pub use config::*;
pub use controller::*;
pub use selection::*;
