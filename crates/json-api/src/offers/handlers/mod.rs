//! Offer Handlers

pub(crate) mod accept;
pub(crate) mod decline;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod my_get;
pub(crate) mod my_index;
pub(crate) mod revise;
