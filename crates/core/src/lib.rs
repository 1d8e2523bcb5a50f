//! Trade-in
//!
//! Domain rules for a used-device trade-in marketplace: quote pricing, the
//! offer and order lifecycles, the session trade-in box and the role policy.

pub mod catalog;
pub mod metadata;
pub mod money;
pub mod offers;
pub mod orders;
pub mod pricing;
pub mod roles;
pub mod tradein_box;
pub mod validation;
