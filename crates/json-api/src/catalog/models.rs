//! Catalog response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein_app::domain::catalog::models::{Condition, DeviceModel, DeviceModelDetails, Variant};

/// Device Model Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeviceModelResponse {
    pub uuid: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,

    /// Base trade-in price in minor units
    pub base_price: u64,
    pub has_carrier_variants: bool,
    pub has_storage_variants: bool,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DeviceModel> for DeviceModelResponse {
    fn from(model: DeviceModel) -> Self {
        Self {
            uuid: model.uuid.into_uuid(),
            name: model.name,
            brand: model.brand,
            category: model.category,
            base_price: model.base_price,
            has_carrier_variants: model.has_carrier_variants,
            has_storage_variants: model.has_storage_variants,
            image_url: model.image_url,
            is_active: model.is_active,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        }
    }
}

/// Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub model_uuid: Uuid,

    /// `carrier` or `storage`
    pub variant_type: String,
    pub name: String,

    /// Signed adjustment in minor units
    pub price_adjustment: i64,
    pub display_order: i32,
}

impl From<Variant> for VariantResponse {
    fn from(variant: Variant) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            model_uuid: variant.model_uuid.into_uuid(),
            variant_type: variant.variant_type.as_str().to_string(),
            name: variant.name,
            price_adjustment: variant.price_adjustment,
            display_order: variant.display_order,
        }
    }
}

/// Device Model Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeviceModelDetailsResponse {
    pub model: DeviceModelResponse,
    pub variants: Vec<VariantResponse>,
}

impl From<DeviceModelDetails> for DeviceModelDetailsResponse {
    fn from(details: DeviceModelDetails) -> Self {
        Self {
            model: details.model.into(),
            variants: details.variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Condition Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConditionResponse {
    pub uuid: Uuid,
    pub name: String,

    /// Decimal price multiplier, e.g. `"0.75"`
    pub multiplier: String,
    pub description: Option<String>,
    pub display_order: i32,
}

impl From<Condition> for ConditionResponse {
    fn from(condition: Condition) -> Self {
        Self {
            uuid: condition.uuid.into_uuid(),
            name: condition.name,
            multiplier: condition.multiplier.to_string(),
            description: condition.description,
            display_order: condition.display_order,
        }
    }
}
