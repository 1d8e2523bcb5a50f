//! Quote Models

use tradein::{metadata::SelectedOptions, pricing::Quote};

use crate::domain::catalog::models::{ConditionUuid, DeviceModelUuid, VariantUuid};

/// A device configuration to be priced, expressed as catalog references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub model: DeviceModelUuid,
    pub condition: Option<ConditionUuid>,
    pub carrier: Option<VariantUuid>,
    pub storage: Option<VariantUuid>,
    pub has_box: bool,
    pub has_charger: bool,
}

/// A priced (or incomplete) quote with the labels of what was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuote {
    pub quote: Quote,
    pub model_name: String,
    pub brand: String,
    pub category: String,
    pub image_url: Option<String>,
    pub condition_name: Option<String>,
    pub carrier_name: Option<String>,
    pub storage_name: Option<String>,
    pub has_box: bool,
    pub has_charger: bool,
    pub currency: String,
}

impl ResolvedQuote {
    /// Selection labels for an offer snapshot; `None` until a condition is chosen.
    pub fn selected_options(&self) -> Option<SelectedOptions> {
        Some(SelectedOptions {
            model_name: self.model_name.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            condition_name: self.condition_name.clone()?,
            carrier_name: self.carrier_name.clone(),
            storage_name: self.storage_name.clone(),
            has_box: self.has_box,
            has_charger: self.has_charger,
        })
    }
}
