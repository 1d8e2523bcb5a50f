//! Offer request and response bodies.

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradein::{metadata::DisplayedPrice, validation::ShippingDetails};
use tradein_app::domain::offers::models::{AcceptedOffer, Offer, OfferDetails, OfferRevision};

use crate::{orders::models::OrderResponse, quotes::models::BreakdownResponse};

/// Shipping and payout details
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingBody {
    pub full_name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<ShippingBody> for ShippingDetails {
    fn from(body: ShippingBody) -> Self {
        ShippingDetails {
            full_name: body.full_name,
            address_line1: body.address_line1,
            address_line2: body.address_line2,
            city: body.city,
            region: body.region,
            postal_code: body.postal_code,
            country: body.country,
            phone: body.phone,
        }
    }
}

impl From<ShippingDetails> for ShippingBody {
    fn from(details: ShippingDetails) -> Self {
        Self {
            full_name: details.full_name,
            address_line1: details.address_line1,
            address_line2: details.address_line2,
            city: details.city,
            region: details.region,
            postal_code: details.postal_code,
            country: details.country,
            phone: details.phone,
        }
    }
}

/// Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    pub uuid: Uuid,
    pub profile_uuid: Uuid,
    pub model_uuid: Uuid,
    pub condition_uuid: Uuid,
    pub carrier_variant_uuid: Option<Uuid>,
    pub storage_variant_uuid: Option<Uuid>,
    pub has_box: bool,
    pub has_charger: bool,

    /// Status as of the response, with lapsed open offers shown as `expired`
    pub status: String,

    /// Current offer in minor units
    pub quoted_price: u64,

    /// Offer at submission, before any revision
    pub original_quoted_price: u64,
    pub model_name: Option<String>,
    pub condition_name: Option<String>,

    /// Itemized breakdown when it still explains `quoted_price`
    pub breakdown: Option<BreakdownResponse>,
    pub shipping: ShippingBody,
    pub version: i64,
    pub expires_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl OfferResponse {
    pub(crate) fn new(offer: Offer, now: Timestamp) -> Self {
        let breakdown = match offer.metadata.displayed_price(offer.quoted_price) {
            DisplayedPrice::Itemized(breakdown) => Some(BreakdownResponse::from(breakdown)),
            DisplayedPrice::QuotedOnly(_) => None,
        };

        Self {
            uuid: offer.uuid.into_uuid(),
            profile_uuid: offer.profile_uuid.into_uuid(),
            model_uuid: offer.model_uuid.into_uuid(),
            condition_uuid: offer.condition_uuid.into_uuid(),
            carrier_variant_uuid: offer.carrier_variant_uuid.map(|uuid| uuid.into_uuid()),
            storage_variant_uuid: offer.storage_variant_uuid.map(|uuid| uuid.into_uuid()),
            has_box: offer.has_box,
            has_charger: offer.has_charger,
            status: offer.effective_status(now).as_str().to_string(),
            quoted_price: offer.quoted_price,
            original_quoted_price: offer.original_quoted_price,
            model_name: offer.metadata.model_name().map(str::to_string),
            condition_name: offer.metadata.condition_name().map(str::to_string),
            breakdown,
            shipping: offer.shipping.into(),
            version: offer.version,
            expires_at: offer.expires_at.to_string(),
            created_at: offer.created_at.to_string(),
            updated_at: offer.updated_at.to_string(),
        }
    }
}

/// Offers Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

impl OffersResponse {
    pub(crate) fn new(offers: Vec<Offer>, now: Timestamp) -> Self {
        Self {
            offers: offers
                .into_iter()
                .map(|offer| OfferResponse::new(offer, now))
                .collect(),
        }
    }
}

/// Offer Revision Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferRevisionResponse {
    pub uuid: Uuid,
    pub previous_price: u64,
    pub new_price: u64,
    pub revised_by: Uuid,
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<OfferRevision> for OfferRevisionResponse {
    fn from(revision: OfferRevision) -> Self {
        Self {
            uuid: revision.uuid.into_uuid(),
            previous_price: revision.previous_price,
            new_price: revision.new_price,
            revised_by: revision.revised_by.into_uuid(),
            reason: revision.reason,
            created_at: revision.created_at.to_string(),
        }
    }
}

/// Offer Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferDetailsResponse {
    pub offer: OfferResponse,

    /// Price revisions, oldest first
    pub revisions: Vec<OfferRevisionResponse>,
}

impl OfferDetailsResponse {
    pub(crate) fn new(details: OfferDetails, now: Timestamp) -> Self {
        Self {
            offer: OfferResponse::new(details.offer, now),
            revisions: details.revisions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Accepted Offer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AcceptedOfferResponse {
    pub offer: OfferResponse,

    /// The order placed for the accepted offer
    pub order: OrderResponse,
}

impl AcceptedOfferResponse {
    pub(crate) fn new(accepted: AcceptedOffer, now: Timestamp) -> Self {
        Self {
            offer: OfferResponse::new(accepted.offer, now),
            order: accepted.order.into(),
        }
    }
}

/// Expected version of the offer being acted on
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferActionRequest {
    pub expected_version: i64,
}
