//! Offers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::PgRow,
    query_as,
    types::{Json, JsonValue},
};
use tracing::warn;
use tradein::{metadata::OfferMetadata, offers::OfferStatus, validation::ShippingDetails};

use crate::{
    database::{price_column, price_from_row},
    domain::{
        catalog::models::{ConditionUuid, DeviceModelUuid, VariantUuid},
        offers::models::{
            NewOfferRevision, Offer, OfferRecord, OfferRevision, OfferRevisionUuid, OfferUuid,
        },
        pagination::Page,
        profiles::models::ProfileUuid,
    },
};

const GET_OFFER_SQL: &str = include_str!("sql/get_offer.sql");
const GET_OFFER_FOR_PROFILE_SQL: &str = include_str!("sql/get_offer_for_profile.sql");
const LOCK_OFFER_SQL: &str = include_str!("sql/lock_offer.sql");
const LIST_OFFERS_SQL: &str = include_str!("sql/list_offers.sql");
const LIST_OFFERS_FOR_PROFILE_SQL: &str = include_str!("sql/list_offers_for_profile.sql");
const CREATE_OFFER_SQL: &str = include_str!("sql/create_offer.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const REVISE_PRICE_SQL: &str = include_str!("sql/revise_price.sql");
const EXPIRE_DUE_OFFERS_SQL: &str = include_str!("sql/expire_due_offers.sql");
const CREATE_REVISION_SQL: &str = include_str!("sql/create_revision.sql");
const LIST_REVISIONS_SQL: &str = include_str!("sql/list_revisions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Offer, sqlx::Error> {
        query_as::<Postgres, Offer>(GET_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_offer_for_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        offer: OfferUuid,
    ) -> Result<Offer, sqlx::Error> {
        query_as::<Postgres, Offer>(GET_OFFER_FOR_PROFILE_SQL)
            .bind(offer.into_uuid())
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an offer and hold a row lock until the transaction ends.
    pub(crate) async fn lock_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Offer, sqlx::Error> {
        query_as::<Postgres, Offer>(LOCK_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<OfferStatus>,
        page: Page,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(LIST_OFFERS_SQL)
            .bind(status.map(OfferStatus::as_str))
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_offers_for_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(LIST_OFFERS_FOR_PROFILE_SQL)
            .bind(profile.into_uuid())
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferRecord,
    ) -> Result<Offer, sqlx::Error> {
        query_as::<Postgres, Offer>(CREATE_OFFER_SQL)
            .bind(offer.uuid.into_uuid())
            .bind(offer.profile_uuid.into_uuid())
            .bind(offer.model_uuid.into_uuid())
            .bind(offer.condition_uuid.into_uuid())
            .bind(offer.carrier_variant_uuid.map(VariantUuid::into_uuid))
            .bind(offer.storage_variant_uuid.map(VariantUuid::into_uuid))
            .bind(offer.has_box)
            .bind(offer.has_charger)
            .bind(price_column(offer.quoted_price, "quoted_price")?)
            .bind(SqlxTimestamp::from(offer.expires_at))
            .bind(Json(offer.metadata))
            .bind(Json(offer.shipping))
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when `expected_version` is stale.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        status: OfferStatus,
        expected_version: i64,
    ) -> Result<Option<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(UPDATE_STATUS_SQL)
            .bind(offer.into_uuid())
            .bind(status.as_str())
            .bind(expected_version)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when `expected_version` is stale.
    pub(crate) async fn revise_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        new_price: u64,
        expected_version: i64,
    ) -> Result<Option<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(REVISE_PRICE_SQL)
            .bind(offer.into_uuid())
            .bind(price_column(new_price, "quoted_price")?)
            .bind(expected_version)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn expire_due_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<Vec<Offer>, sqlx::Error> {
        query_as::<Postgres, Offer>(EXPIRE_DUE_OFFERS_SQL)
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_revision(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        revision: NewOfferRevision,
    ) -> Result<OfferRevision, sqlx::Error> {
        query_as::<Postgres, OfferRevision>(CREATE_REVISION_SQL)
            .bind(revision.uuid.into_uuid())
            .bind(revision.offer_uuid.into_uuid())
            .bind(price_column(revision.previous_price, "previous_price")?)
            .bind(price_column(revision.new_price, "new_price")?)
            .bind(revision.revised_by.into_uuid())
            .bind(revision.reason)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_revisions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Vec<OfferRevision>, sqlx::Error> {
        query_as::<Postgres, OfferRevision>(LIST_REVISIONS_SQL)
            .bind(offer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Offer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OfferStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OfferUuid::from_uuid(row.try_get("uuid")?),
            profile_uuid: ProfileUuid::from_uuid(row.try_get("profile_uuid")?),
            model_uuid: DeviceModelUuid::from_uuid(row.try_get("model_uuid")?),
            condition_uuid: ConditionUuid::from_uuid(row.try_get("condition_uuid")?),
            carrier_variant_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("carrier_variant_uuid")?
                .map(VariantUuid::from_uuid),
            storage_variant_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("storage_variant_uuid")?
                .map(VariantUuid::from_uuid),
            has_box: row.try_get("has_box")?,
            has_charger: row.try_get("has_charger")?,
            quoted_price: price_from_row(row, "quoted_price")?,
            original_quoted_price: price_from_row(row, "original_quoted_price")?,
            status,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            metadata: decode_metadata(row.try_get("uuid")?, row.try_get("metadata")?),
            shipping: row.try_get::<Json<ShippingDetails>, _>("shipping")?.0,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Damaged snapshots still load so the offer stays visible, priced from its
/// quoted price alone.
fn decode_metadata(offer: uuid::Uuid, value: JsonValue) -> OfferMetadata {
    OfferMetadata::decode(value).unwrap_or_else(|damaged| {
        warn!(%offer, "offer metadata falls back to legacy: {damaged}");

        OfferMetadata::unreadable()
    })
}

impl<'r> FromRow<'r, PgRow> for OfferRevision {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OfferRevisionUuid::from_uuid(row.try_get("uuid")?),
            offer_uuid: OfferUuid::from_uuid(row.try_get("offer_uuid")?),
            previous_price: price_from_row(row, "previous_price")?,
            new_price: price_from_row(row, "new_price")?,
            revised_by: ProfileUuid::from_uuid(row.try_get("revised_by")?),
            reason: row.try_get("reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
