//! Offers: submitted quotes awaiting an administrator's decision.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OffersServiceError;
pub use service::*;
