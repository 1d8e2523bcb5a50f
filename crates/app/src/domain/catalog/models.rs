//! Catalog Models

use jiff::Timestamp;
use tradein::catalog::{Multiplier, VariantFlags, VariantType};

use crate::uuids::TypedUuid;

/// Device Model UUID
pub type DeviceModelUuid = TypedUuid<DeviceModel>;

/// Condition UUID
pub type ConditionUuid = TypedUuid<Condition>;

/// Variant UUID
pub type VariantUuid = TypedUuid<Variant>;

/// A device that can be traded in.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModel {
    pub uuid: DeviceModelUuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: u64,
    pub has_carrier_variants: bool,
    pub has_storage_variants: bool,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl DeviceModel {
    /// Which variant kinds this model offers.
    pub fn variant_flags(&self) -> VariantFlags {
        VariantFlags {
            carrier: self.has_carrier_variants,
            storage: self.has_storage_variants,
        }
    }

    /// Whether the model can currently be quoted.
    pub fn is_quotable(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}

/// A device model together with its variants.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModelDetails {
    pub model: DeviceModel,
    pub variants: Vec<Variant>,
}

/// New Device Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeviceModel {
    pub uuid: DeviceModelUuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: u64,
    pub has_carrier_variants: bool,
    pub has_storage_variants: bool,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Device Model Update
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModelUpdate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub base_price: u64,
    pub has_carrier_variants: bool,
    pub has_storage_variants: bool,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// A condition tier and its price multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub uuid: ConditionUuid,
    pub name: String,
    pub multiplier: Multiplier,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
}

/// New Condition
#[derive(Debug, Clone, PartialEq)]
pub struct NewCondition {
    pub uuid: ConditionUuid,
    pub name: String,
    pub multiplier: Multiplier,
    pub description: Option<String>,
    pub display_order: i32,
}

/// A carrier or storage option of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub uuid: VariantUuid,
    pub model_uuid: DeviceModelUuid,
    pub variant_type: VariantType,
    pub name: String,
    pub price_adjustment: i64,
    pub display_order: i32,
    pub created_at: Timestamp,
}

/// New Variant
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub model_uuid: DeviceModelUuid,
    pub variant_type: VariantType,
    pub name: String,
    pub price_adjustment: i64,
    pub display_order: i32,
}
