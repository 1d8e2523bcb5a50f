//! Quotes: pricing a configuration against the live catalog.

pub mod errors;
pub mod models;
pub(crate) mod resolver;
pub mod service;

pub use errors::QuotesServiceError;
pub use service::*;
