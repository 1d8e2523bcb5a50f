//! Trade-in box response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::tradein_box::{BoxItem, BoxSummary};

/// Box Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BoxItemResponse {
    pub id: Uuid,
    pub model: Uuid,
    pub condition: Uuid,
    pub carrier: Option<Uuid>,
    pub storage: Option<Uuid>,
    pub has_box: bool,
    pub has_charger: bool,

    /// Quote at the time the item was added, in minor units
    pub quoted_price: u64,
    pub model_name: String,
    pub brand: String,
    pub category: String,
    pub image_url: Option<String>,
    pub condition_name: String,
    pub carrier_name: Option<String>,
    pub storage_name: Option<String>,
    pub added_at: String,
}

impl From<BoxItem> for BoxItemResponse {
    fn from(item: BoxItem) -> Self {
        Self {
            id: item.id,
            model: item.selection.model,
            condition: item.selection.condition,
            carrier: item.selection.carrier,
            storage: item.selection.storage,
            has_box: item.selection.has_box,
            has_charger: item.selection.has_charger,
            quoted_price: item.quoted_price,
            model_name: item.display.model_name,
            brand: item.display.brand,
            category: item.display.category,
            image_url: item.display.image_url,
            condition_name: item.display.condition_name,
            carrier_name: item.display.carrier_name,
            storage_name: item.display.storage_name,
            added_at: item.added_at.to_string(),
        }
    }
}

/// Box Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BoxResponse {
    pub items: Vec<BoxItemResponse>,
    pub item_count: usize,

    /// Sum of quoted prices in minor units
    pub total_price: u64,
}

impl From<BoxSummary> for BoxResponse {
    fn from(summary: BoxSummary) -> Self {
        Self {
            items: summary.items.into_iter().map(Into::into).collect(),
            item_count: summary.item_count,
            total_price: summary.total_price,
        }
    }
}
