//! Catalog

pub(crate) mod conditions;
mod errors;
mod handlers;
pub(crate) mod models;
pub(crate) mod variants;

pub(crate) use handlers::*;
