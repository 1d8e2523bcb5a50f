//! Offers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use tradein::{
    metadata::OfferMetadata,
    offers::{ExpiryPolicy, OfferAction, OfferStatus},
    pricing::{PricingRules, Quote},
    roles::Actor,
};

use crate::{
    database::Db,
    domain::{
        catalog::models::ConditionUuid,
        offers::{
            errors::OffersServiceError,
            models::{
                AcceptedOffer, NewOffer, NewOfferRevision, Offer, OfferDetails, OfferFilter,
                OfferRecord, OfferRevisionUuid, OfferUuid, PriceRevision,
            },
            repository::PgOffersRepository,
        },
        orders::{
            models::{NewOrder, OrderUuid},
            repository::PgOrdersRepository,
        },
        pagination::Page,
        profiles::models::ProfileUuid,
        quotes::resolver::QuoteResolver,
    },
};

#[derive(Debug, Clone)]
pub struct PgOffersService {
    db: Db,
    repository: PgOffersRepository,
    orders: PgOrdersRepository,
    resolver: QuoteResolver,
    expiry: ExpiryPolicy,
}

impl PgOffersService {
    #[must_use]
    pub fn new(db: Db, rules: PricingRules, expiry: ExpiryPolicy) -> Self {
        Self {
            db,
            repository: PgOffersRepository::new(),
            orders: PgOrdersRepository::new(),
            resolver: QuoteResolver::new(rules),
            expiry,
        }
    }

    /// Re-quote `offer` inside `tx` and insert it as a pending offer.
    async fn create_submitted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        offer: NewOffer,
    ) -> Result<Offer, OffersServiceError> {
        let condition_uuid = check_submission(&offer)?;

        let resolved = self.resolver.resolve(tx, &offer.request).await?;

        let selections = resolved
            .selected_options()
            .ok_or(OffersServiceError::IncompleteConfiguration)?;

        let Quote::Priced(breakdown) = resolved.quote else {
            return Err(OffersServiceError::IncompleteConfiguration);
        };

        let record = OfferRecord {
            uuid: offer.uuid,
            profile_uuid: profile,
            model_uuid: offer.request.model,
            condition_uuid,
            carrier_variant_uuid: offer.request.carrier,
            storage_variant_uuid: offer.request.storage,
            has_box: offer.request.has_box,
            has_charger: offer.request.has_charger,
            quoted_price: breakdown.final_price,
            expires_at: self.expiry.expires_at(Timestamp::now())?,
            metadata: OfferMetadata::current(breakdown, selections),
            shipping: offer.shipping,
        };

        Ok(self.repository.create_offer(tx, record).await?)
    }

    /// Lock `offer`, check its version and validate `action` at `now`.
    async fn begin_decision(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        action: OfferAction,
        expected_version: i64,
    ) -> Result<(Offer, OfferStatus), OffersServiceError> {
        let current = self.repository.lock_offer(tx, offer).await?;

        if current.version != expected_version {
            warn!(
                %offer,
                expected = expected_version,
                actual = current.version,
                "stale offer version"
            );

            return Err(OffersServiceError::Conflict {
                expected: expected_version,
                actual: current.version,
            });
        }

        let next = current
            .state()
            .transition(action, Timestamp::now())
            .inspect_err(|rejected| {
                warn!(
                    %offer,
                    status = %current.status,
                    ?action,
                    "offer transition rejected: {rejected}"
                );
            })?;

        Ok((current, next))
    }
}

/// Checks that need no database: shipping details and a chosen condition.
fn check_submission(offer: &NewOffer) -> Result<ConditionUuid, OffersServiceError> {
    offer.shipping.validate()?;

    offer
        .request
        .condition
        .ok_or(OffersServiceError::IncompleteConfiguration)
}

fn require_admin(actor: &Actor) -> Result<(), OffersServiceError> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(OffersServiceError::Forbidden)
    }
}

#[async_trait]
impl OffersService for PgOffersService {
    async fn submit_offer(
        &self,
        profile: ProfileUuid,
        offer: NewOffer,
    ) -> Result<Offer, OffersServiceError> {
        check_submission(&offer)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.create_submitted(&mut tx, profile, offer).await?;

        tx.commit().await?;

        info!(
            offer = %created.uuid,
            %profile,
            quoted_price = created.quoted_price,
            expires_at = %created.expires_at,
            "offer submitted"
        );

        Ok(created)
    }

    async fn submit_offers(
        &self,
        profile: ProfileUuid,
        offers: Vec<NewOffer>,
    ) -> Result<Vec<Offer>, OffersServiceError> {
        for offer in &offers {
            check_submission(offer)?;
        }

        let mut tx = self.db.begin_transaction().await?;
        let mut created = Vec::with_capacity(offers.len());

        for offer in offers {
            let uuid = offer.uuid;

            let submitted = self
                .create_submitted(&mut tx, profile, offer)
                .await
                .inspect_err(|error| {
                    warn!(offer = %uuid, %profile, "batch submission rejected: {error}");
                })?;

            created.push(submitted);
        }

        tx.commit().await?;

        info!(
            %profile,
            count = created.len(),
            total = created.iter().map(|offer| offer.quoted_price).sum::<u64>(),
            "offers submitted"
        );

        Ok(created)
    }

    async fn get_offer_for_profile(
        &self,
        profile: ProfileUuid,
        offer: OfferUuid,
    ) -> Result<Offer, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offer = self
            .repository
            .get_offer_for_profile(&mut tx, profile, offer)
            .await?;

        tx.commit().await?;

        Ok(offer)
    }

    async fn list_offers_for_profile(
        &self,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Offer>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offers = self
            .repository
            .list_offers_for_profile(&mut tx, profile, page)
            .await?;

        tx.commit().await?;

        Ok(offers)
    }

    async fn list_offers(&self, filter: OfferFilter) -> Result<Vec<Offer>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offers = self
            .repository
            .list_offers(&mut tx, filter.status, filter.page)
            .await?;

        tx.commit().await?;

        Ok(offers)
    }

    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferDetails, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let offer = self.repository.get_offer(&mut tx, offer).await?;
        let revisions = self.repository.list_revisions(&mut tx, offer.uuid).await?;

        tx.commit().await?;

        Ok(OfferDetails { offer, revisions })
    }

    async fn accept_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        expected_version: i64,
    ) -> Result<AcceptedOffer, OffersServiceError> {
        require_admin(&actor)?;

        let mut tx = self.db.begin_transaction().await?;

        let (current, next) = self
            .begin_decision(&mut tx, offer, OfferAction::Accept, expected_version)
            .await?;

        let accepted = self
            .repository
            .update_status(&mut tx, offer, next, expected_version)
            .await?
            .ok_or(OffersServiceError::Conflict {
                expected: expected_version,
                actual: current.version,
            })?;

        let order = self
            .orders
            .place_order(
                &mut tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    offer_uuid: offer,
                    profile_uuid: accepted.profile_uuid,
                },
                ProfileUuid::from_uuid(actor.profile),
            )
            .await?;

        tx.commit().await?;

        info!(%offer, order = %order.uuid, actor = %actor.profile, "offer accepted");

        Ok(AcceptedOffer {
            offer: accepted,
            order,
        })
    }

    async fn decline_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        expected_version: i64,
    ) -> Result<Offer, OffersServiceError> {
        require_admin(&actor)?;

        let mut tx = self.db.begin_transaction().await?;

        let (current, next) = self
            .begin_decision(&mut tx, offer, OfferAction::Decline, expected_version)
            .await?;

        let declined = self
            .repository
            .update_status(&mut tx, offer, next, expected_version)
            .await?
            .ok_or(OffersServiceError::Conflict {
                expected: expected_version,
                actual: current.version,
            })?;

        tx.commit().await?;

        info!(%offer, actor = %actor.profile, "offer declined");

        Ok(declined)
    }

    async fn revise_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        revision: PriceRevision,
    ) -> Result<Offer, OffersServiceError> {
        require_admin(&actor)?;

        let mut tx = self.db.begin_transaction().await?;

        let (current, _revised) = self
            .begin_decision(&mut tx, offer, OfferAction::Revise, revision.expected_version)
            .await?;

        let revised = self
            .repository
            .revise_price(&mut tx, offer, revision.new_price, revision.expected_version)
            .await?
            .ok_or(OffersServiceError::Conflict {
                expected: revision.expected_version,
                actual: current.version,
            })?;

        self.repository
            .create_revision(
                &mut tx,
                NewOfferRevision {
                    uuid: OfferRevisionUuid::new(),
                    offer_uuid: offer,
                    previous_price: current.quoted_price,
                    new_price: revision.new_price,
                    revised_by: ProfileUuid::from_uuid(actor.profile),
                    reason: revision.reason,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            %offer,
            previous_price = current.quoted_price,
            new_price = revised.quoted_price,
            actor = %actor.profile,
            "offer revised"
        );

        Ok(revised)
    }

    async fn expire_due_offers(&self, now: Timestamp) -> Result<Vec<Offer>, OffersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let expired = self.repository.expire_due_offers(&mut tx, now).await?;

        tx.commit().await?;

        info!(count = expired.len(), %now, "expired due offers");

        Ok(expired)
    }
}

#[automock]
#[async_trait]
pub trait OffersService: Send + Sync {
    /// Re-quote a configuration and record it as a pending offer for `profile`.
    ///
    /// The breakdown and selection labels are snapshotted so later catalog edits do not
    /// change what the customer was shown.
    async fn submit_offer(
        &self,
        profile: ProfileUuid,
        offer: NewOffer,
    ) -> Result<Offer, OffersServiceError>;

    /// Submit several configurations for `profile` in one transaction.
    ///
    /// Either every offer is created or none is.
    async fn submit_offers(
        &self,
        profile: ProfileUuid,
        offers: Vec<NewOffer>,
    ) -> Result<Vec<Offer>, OffersServiceError>;

    /// Retrieve one of `profile`'s offers.
    async fn get_offer_for_profile(
        &self,
        profile: ProfileUuid,
        offer: OfferUuid,
    ) -> Result<Offer, OffersServiceError>;

    /// `profile`'s offers, newest first.
    async fn list_offers_for_profile(
        &self,
        profile: ProfileUuid,
        page: Page,
    ) -> Result<Vec<Offer>, OffersServiceError>;

    /// All offers, optionally filtered by stored status.
    async fn list_offers(&self, filter: OfferFilter) -> Result<Vec<Offer>, OffersServiceError>;

    /// Retrieve an offer with its revision trail.
    async fn get_offer(&self, offer: OfferUuid) -> Result<OfferDetails, OffersServiceError>;

    /// Accept an open offer and place its order in the same transaction.
    async fn accept_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        expected_version: i64,
    ) -> Result<AcceptedOffer, OffersServiceError>;

    async fn decline_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        expected_version: i64,
    ) -> Result<Offer, OffersServiceError>;

    /// Change an open offer's price and record the revision.
    async fn revise_offer(
        &self,
        actor: Actor,
        offer: OfferUuid,
        revision: PriceRevision,
    ) -> Result<Offer, OffersServiceError>;

    /// Mark every open offer whose expiry is at or before `now` as expired.
    async fn expire_due_offers(&self, now: Timestamp) -> Result<Vec<Offer>, OffersServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use testresult::TestResult;
    use tradein::{
        offers::OfferTransitionError,
        orders::OrderStatus,
        roles::Role,
        validation::ShippingDetails,
    };
    use uuid::Uuid;

    use crate::{
        domain::{
            catalog::{
                models::{DeviceModelUpdate, DeviceModelUuid},
                service::CatalogService,
            },
            quotes::models::QuoteRequest,
        },
        test::{TestContext, shipping_details},
    };

    use super::*;

    fn offline_service() -> TestResult<PgOffersService> {
        let pool = PgPool::connect_lazy("postgres://offline@localhost:1/none")?;

        Ok(PgOffersService::new(
            Db::new(pool),
            PricingRules::default(),
            ExpiryPolicy::default(),
        ))
    }

    fn request_without_condition() -> QuoteRequest {
        QuoteRequest {
            model: DeviceModelUuid::new(),
            condition: None,
            carrier: None,
            storage: None,
            has_box: false,
            has_charger: false,
        }
    }

    #[tokio::test]
    async fn missing_shipping_fields_are_rejected_before_storage() -> TestResult {
        let result = offline_service()?
            .submit_offer(
                ProfileUuid::new(),
                NewOffer {
                    uuid: OfferUuid::new(),
                    request: request_without_condition(),
                    shipping: ShippingDetails::default(),
                },
            )
            .await;

        assert!(
            matches!(
                &result,
                Err(OffersServiceError::Validation(errors))
                    if errors.has("full_name") && errors.has("city") && errors.has("country")
            ),
            "expected shipping validation errors, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn configuration_without_condition_cannot_be_submitted() -> TestResult {
        let result = offline_service()?
            .submit_offer(
                ProfileUuid::new(),
                NewOffer {
                    uuid: OfferUuid::new(),
                    request: request_without_condition(),
                    shipping: shipping_details(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::IncompleteConfiguration)),
            "expected IncompleteConfiguration, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_admins_cannot_decide_offers() -> TestResult {
        let user = Actor::new(Uuid::now_v7(), Role::User);
        let service = offline_service()?;

        let accept = service.accept_offer(user, OfferUuid::new(), 1).await;
        let decline = service.decline_offer(user, OfferUuid::new(), 1).await;

        assert!(matches!(accept, Err(OffersServiceError::Forbidden)));
        assert!(matches!(decline, Err(OffersServiceError::Forbidden)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn submitted_offer_snapshots_the_breakdown() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let request = ctx.offer_request().await?;

        let offer = ctx
            .offers
            .submit_offer(
                seller.uuid,
                NewOffer {
                    uuid: OfferUuid::new(),
                    request: request.clone(),
                    shipping: shipping_details(),
                },
            )
            .await?;

        assert_eq!(offer.status, OfferStatus::Pending);
        assert_eq!(offer.quoted_price, offer.original_quoted_price);
        assert_eq!(offer.version, 1);
        assert_eq!(
            offer.metadata.breakdown().map(|b| b.final_price),
            Some(offer.quoted_price)
        );
        assert_eq!(offer.shipping, shipping_details());

        let model = ctx.catalog.get_model(request.model).await?.model;

        ctx.catalog
            .update_model(
                model.uuid,
                DeviceModelUpdate {
                    name: "Renamed".to_string(),
                    brand: model.brand.clone(),
                    category: model.category.clone(),
                    base_price: model.base_price * 2,
                    has_carrier_variants: model.has_carrier_variants,
                    has_storage_variants: model.has_storage_variants,
                    image_url: model.image_url.clone(),
                    is_active: model.is_active,
                },
            )
            .await?;

        let stored = ctx.offers.get_offer_for_profile(seller.uuid, offer.uuid).await?;

        assert_eq!(stored.metadata, offer.metadata);
        assert_eq!(stored.metadata.model_name(), Some(model.name.as_str()));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn offers_are_private_to_their_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let other = ctx.create_profile("other@example.com", Role::User).await?;
        let offer = ctx.submit_offer(&seller).await?;

        let result = ctx.offers.get_offer_for_profile(other.uuid, offer.uuid).await;

        assert!(matches!(result, Err(OffersServiceError::NotFound)));
        assert!(
            ctx.offers
                .list_offers_for_profile(other.uuid, Page::default())
                .await?
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn accepting_places_an_order() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let offer = ctx.submit_offer(&seller).await?;

        let accepted = ctx
            .offers
            .accept_offer(admin.actor(), offer.uuid, offer.version)
            .await?;

        assert_eq!(accepted.offer.status, OfferStatus::Accepted);
        assert_eq!(accepted.offer.version, offer.version + 1);
        assert_eq!(accepted.order.status, OrderStatus::OrderPlaced);
        assert_eq!(accepted.order.offer_uuid, offer.uuid);
        assert_eq!(accepted.order.profile_uuid, seller.uuid);

        let again = ctx
            .offers
            .accept_offer(admin.actor(), offer.uuid, accepted.offer.version)
            .await;

        assert!(
            matches!(
                again,
                Err(OffersServiceError::Transition(OfferTransitionError::Terminal(
                    OfferStatus::Accepted
                )))
            ),
            "expected Terminal, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn stale_version_leaves_offer_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let offer = ctx.submit_offer(&seller).await?;

        let result = ctx
            .offers
            .decline_offer(admin.actor(), offer.uuid, offer.version + 5)
            .await;

        assert!(
            matches!(result, Err(OffersServiceError::Conflict { .. })),
            "expected Conflict, got {result:?}"
        );

        let stored = ctx.offers.get_offer(offer.uuid).await?.offer;

        assert_eq!(stored.status, OfferStatus::Pending);
        assert_eq!(stored.version, offer.version);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn revision_is_audited_and_offer_stays_open() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let offer = ctx.submit_offer(&seller).await?;

        let revised = ctx
            .offers
            .revise_offer(
                admin.actor(),
                offer.uuid,
                PriceRevision {
                    new_price: 123_45,
                    reason: Some("screen scratches".to_string()),
                    expected_version: offer.version,
                },
            )
            .await?;

        assert_eq!(revised.status, OfferStatus::Revised);
        assert_eq!(revised.quoted_price, 123_45);
        assert_eq!(revised.original_quoted_price, offer.quoted_price);

        let details = ctx.offers.get_offer(offer.uuid).await?;
        let revision = details.revisions.first();

        assert_eq!(details.revisions.len(), 1);
        assert_eq!(revision.map(|r| r.previous_price), Some(offer.quoted_price));
        assert_eq!(revision.map(|r| r.revised_by), Some(admin.uuid));

        let accepted = ctx
            .offers
            .accept_offer(admin.actor(), offer.uuid, revised.version)
            .await?;

        assert_eq!(accepted.offer.quoted_price, 123_45);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn expired_offer_cannot_be_accepted() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let offers = ctx.offers_with_expiry(ExpiryPolicy::new(0));
        let request = ctx.offer_request().await?;

        let offer = offers
            .submit_offer(
                seller.uuid,
                NewOffer {
                    uuid: OfferUuid::new(),
                    request,
                    shipping: shipping_details(),
                },
            )
            .await?;

        let result = offers
            .accept_offer(admin.actor(), offer.uuid, offer.version)
            .await;

        assert!(
            matches!(
                result,
                Err(OffersServiceError::Transition(OfferTransitionError::Expired(_)))
            ),
            "expected Expired, got {result:?}"
        );
        assert_eq!(offer.effective_status(Timestamp::now()), OfferStatus::Expired);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn sweep_expires_only_due_open_offers() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let open = ctx.submit_offer(&seller).await?;
        let declined = ctx.submit_offer(&seller).await?;

        ctx.offers
            .decline_offer(admin.actor(), declined.uuid, declined.version)
            .await?;

        let before_expiry = ctx
            .offers
            .expire_due_offers(open.expires_at.checked_sub(jiff::SignedDuration::from_secs(1))?)
            .await?;

        assert!(before_expiry.is_empty());

        let swept = ctx.offers.expire_due_offers(open.expires_at).await?;

        assert_eq!(swept.iter().map(|o| o.uuid).collect::<Vec<_>>(), vec![open.uuid]);
        assert_eq!(
            ctx.offers.get_offer(declined.uuid).await?.offer.status,
            OfferStatus::Declined
        );

        Ok(())
    }

    #[tokio::test]
    async fn batch_with_one_bad_shipping_address_is_rejected_up_front() -> TestResult {
        let complete = NewOffer {
            uuid: OfferUuid::new(),
            request: QuoteRequest {
                condition: Some(ConditionUuid::new()),
                ..request_without_condition()
            },
            shipping: shipping_details(),
        };
        let broken = NewOffer {
            uuid: OfferUuid::new(),
            shipping: ShippingDetails::default(),
            ..complete.clone()
        };

        let result = offline_service()?
            .submit_offers(ProfileUuid::new(), vec![complete, broken])
            .await;

        assert!(
            matches!(&result, Err(OffersServiceError::Validation(errors)) if errors.has("city")),
            "expected shipping validation errors, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn batch_submission_creates_every_offer() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let request = ctx.offer_request().await?;

        let offers = (0..2)
            .map(|_| NewOffer {
                uuid: OfferUuid::new(),
                request: request.clone(),
                shipping: shipping_details(),
            })
            .collect::<Vec<_>>();

        let created = ctx.offers.submit_offers(seller.uuid, offers).await?;

        assert_eq!(created.len(), 2);
        assert_eq!(
            ctx.offers
                .list_offers_for_profile(seller.uuid, Page::default())
                .await?
                .len(),
            2
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn failed_batch_submission_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let seller = ctx.create_profile("seller@example.com", Role::User).await?;
        let request = ctx.offer_request().await?;

        let valid = NewOffer {
            uuid: OfferUuid::new(),
            request: request.clone(),
            shipping: shipping_details(),
        };
        let unknown_model = NewOffer {
            uuid: OfferUuid::new(),
            request: QuoteRequest {
                model: DeviceModelUuid::new(),
                ..request
            },
            shipping: shipping_details(),
        };

        let result = ctx
            .offers
            .submit_offers(seller.uuid, vec![valid, unknown_model])
            .await;

        assert!(result.is_err(), "expected the batch to fail, got {result:?}");
        assert!(
            ctx.offers
                .list_offers_for_profile(seller.uuid, Page::default())
                .await?
                .is_empty(),
            "no offer from a failed batch may be stored"
        );

        Ok(())
    }
}
