//! Order Handlers

pub(crate) mod final_price;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod my_index;
pub(crate) mod status;
