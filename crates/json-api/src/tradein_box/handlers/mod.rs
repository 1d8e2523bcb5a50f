//! Trade-in Box Handlers

pub(crate) mod add_item;
pub(crate) mod checkout;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove_item;
