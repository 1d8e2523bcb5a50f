//! Profiles

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::*;
