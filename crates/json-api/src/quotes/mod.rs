//! Quotes

pub(crate) mod create;
pub(crate) mod errors;
pub(crate) mod models;
