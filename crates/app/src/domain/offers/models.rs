//! Offer Models

use jiff::Timestamp;
use tradein::{
    metadata::OfferMetadata,
    offers::{OfferState, OfferStatus},
    validation::ShippingDetails,
};

use crate::{
    domain::{
        catalog::models::{ConditionUuid, DeviceModelUuid, VariantUuid},
        orders::models::Order,
        pagination::Page,
        profiles::models::ProfileUuid,
        quotes::models::QuoteRequest,
    },
    uuids::TypedUuid,
};

/// Offer UUID
pub type OfferUuid = TypedUuid<Offer>;

/// Offer Revision UUID
pub type OfferRevisionUuid = TypedUuid<OfferRevision>;

/// A customer's request to sell one configured device at a quoted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub uuid: OfferUuid,
    pub profile_uuid: ProfileUuid,
    pub model_uuid: DeviceModelUuid,
    pub condition_uuid: ConditionUuid,
    pub carrier_variant_uuid: Option<VariantUuid>,
    pub storage_variant_uuid: Option<VariantUuid>,
    pub has_box: bool,
    pub has_charger: bool,
    pub quoted_price: u64,
    pub original_quoted_price: u64,
    pub status: OfferStatus,
    pub expires_at: Timestamp,
    pub metadata: OfferMetadata,
    pub shipping: ShippingDetails,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Offer {
    pub fn state(&self) -> OfferState {
        OfferState {
            status: self.status,
            expires_at: self.expires_at,
        }
    }

    /// Status as presented at `now`; open offers past expiry read as expired.
    pub fn effective_status(&self, now: Timestamp) -> OfferStatus {
        self.state().effective_status(now)
    }
}

/// New Offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub uuid: OfferUuid,
    pub request: QuoteRequest,
    pub shipping: ShippingDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OfferRecord {
    pub uuid: OfferUuid,
    pub profile_uuid: ProfileUuid,
    pub model_uuid: DeviceModelUuid,
    pub condition_uuid: ConditionUuid,
    pub carrier_variant_uuid: Option<VariantUuid>,
    pub storage_variant_uuid: Option<VariantUuid>,
    pub has_box: bool,
    pub has_charger: bool,
    pub quoted_price: u64,
    pub expires_at: Timestamp,
    pub metadata: OfferMetadata,
    pub shipping: ShippingDetails,
}

/// A recorded price change made by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRevision {
    pub uuid: OfferRevisionUuid,
    pub offer_uuid: OfferUuid,
    pub previous_price: u64,
    pub new_price: u64,
    pub revised_by: ProfileUuid,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOfferRevision {
    pub uuid: OfferRevisionUuid,
    pub offer_uuid: OfferUuid,
    pub previous_price: u64,
    pub new_price: u64,
    pub revised_by: ProfileUuid,
    pub reason: Option<String>,
}

/// Requested price revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRevision {
    pub new_price: u64,
    pub reason: Option<String>,
    pub expected_version: i64,
}

/// An accepted offer and the order it created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedOffer {
    pub offer: Offer,
    pub order: Order,
}

/// An offer with its revision trail, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDetails {
    pub offer: Offer,
    pub revisions: Vec<OfferRevision>,
}

/// Offer listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferFilter {
    pub status: Option<OfferStatus>,
    pub page: Page,
}
