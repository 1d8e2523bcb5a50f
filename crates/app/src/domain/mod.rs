//! Trade-in Domain Concerns

pub mod catalog;
pub mod offers;
pub mod orders;
pub mod pagination;
pub mod profiles;
pub mod quotes;
