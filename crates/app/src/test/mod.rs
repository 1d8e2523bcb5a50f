//! Shared fixtures for service tests.

mod context;

use tradein::validation::ShippingDetails;

pub(crate) use context::TestContext;

/// A complete shipping address.
pub(crate) fn shipping_details() -> ShippingDetails {
    ShippingDetails {
        full_name: "Grace Hopper".to_string(),
        address_line1: "1 Compiler Way".to_string(),
        address_line2: None,
        city: "Arlington".to_string(),
        region: Some("VA".to_string()),
        postal_code: "22201".to_string(),
        country: "US".to_string(),
        phone: Some("+1 555 0100".to_string()),
    }
}
