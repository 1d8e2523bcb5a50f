//! Test context for service-level integration tests.

use std::str::FromStr;

use rust_decimal::Decimal;
use testresult::TestResult;
use tradein::{
    catalog::{Multiplier, VariantType},
    offers::ExpiryPolicy,
    pricing::PricingRules,
    roles::Role,
};
use uuid::Uuid;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        catalog::{
            CatalogService, CatalogServiceError, PgCatalogService,
            models::{
                Condition, ConditionUuid, DeviceModel, DeviceModelUuid, NewCondition,
                NewDeviceModel, NewVariant, Variant, VariantUuid,
            },
        },
        offers::{
            OffersService, PgOffersService,
            models::{NewOffer, Offer, OfferUuid},
        },
        orders::{PgOrdersService, models::Order},
        profiles::{
            PgProfilesService, ProfilesService, ProfilesServiceError,
            models::{NewProfile, Profile, ProfileUuid},
        },
        quotes::{PgQuotesService, models::QuoteRequest},
    },
};

use super::{db::TestDb, shipping_details};

pub struct TestContext {
    pub db: TestDb,
    pub catalog: PgCatalogService,
    pub quotes: PgQuotesService,
    pub offers: PgOffersService,
    pub orders: PgOrdersService,
    pub profiles: PgProfilesService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let rules = PricingRules::default();

        Self {
            catalog: PgCatalogService::new(db.clone()),
            quotes: PgQuotesService::new(db.clone(), rules.clone()),
            offers: PgOffersService::new(db.clone(), rules, ExpiryPolicy::default()),
            orders: PgOrdersService::new(db.clone()),
            profiles: PgProfilesService::new(db),
            auth: PgAuthService::new(test_db.pool().clone()),
            db: test_db,
        }
    }

    /// An offers service over the same database with a different expiry window.
    pub fn offers_with_expiry(&self, expiry: ExpiryPolicy) -> PgOffersService {
        PgOffersService::new(
            Db::new(self.db.pool().clone()),
            PricingRules::default(),
            expiry,
        )
    }

    pub async fn create_profile(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Profile, ProfilesServiceError> {
        self.profiles
            .create_profile(NewProfile {
                uuid: ProfileUuid::new(),
                email: email.to_string(),
                display_name: None,
                role,
            })
            .await
    }

    pub async fn create_model(
        &self,
        name: &str,
        base_price: u64,
        has_carrier_variants: bool,
        has_storage_variants: bool,
    ) -> Result<DeviceModel, CatalogServiceError> {
        self.catalog
            .create_model(NewDeviceModel {
                uuid: DeviceModelUuid::new(),
                name: name.to_string(),
                brand: "Test Brand".to_string(),
                category: "phone".to_string(),
                base_price,
                has_carrier_variants,
                has_storage_variants,
                image_url: None,
                is_active: true,
            })
            .await
    }

    pub async fn create_condition(
        &self,
        name: &str,
        multiplier: &str,
        display_order: i32,
    ) -> Result<Condition, CatalogServiceError> {
        let multiplier = Decimal::from_str(multiplier)
            .ok()
            .and_then(|value| Multiplier::new(value).ok())
            .ok_or(CatalogServiceError::InvalidData)?;

        self.catalog
            .create_condition(NewCondition {
                uuid: ConditionUuid::new(),
                name: name.to_string(),
                multiplier,
                description: None,
                display_order,
            })
            .await
    }

    pub async fn create_variant(
        &self,
        model: DeviceModelUuid,
        variant_type: VariantType,
        name: &str,
        price_adjustment: i64,
    ) -> Result<Variant, CatalogServiceError> {
        self.catalog
            .create_variant(NewVariant {
                uuid: VariantUuid::new(),
                model_uuid: model,
                variant_type,
                name: name.to_string(),
                price_adjustment,
                display_order: 0,
            })
            .await
    }

    /// A complete configuration of a fresh model priced at 400.00 in "Good" (0.75)
    /// condition with a 256GB (+40.00) storage variant and a box.
    pub async fn offer_request(&self) -> Result<QuoteRequest, CatalogServiceError> {
        let suffix = Uuid::now_v7().simple().to_string();

        let model = self
            .create_model(&format!("iPhone 13 {suffix}"), 400_00, false, true)
            .await?;
        let condition = self
            .create_condition(&format!("Good {suffix}"), "0.75", 1)
            .await?;
        let storage = self
            .create_variant(model.uuid, VariantType::Storage, "256GB", 40_00)
            .await?;

        Ok(QuoteRequest {
            model: model.uuid,
            condition: Some(condition.uuid),
            carrier: None,
            storage: Some(storage.uuid),
            has_box: true,
            has_charger: false,
        })
    }

    /// Submit a pending offer for `seller` against a fresh catalog entry.
    pub async fn submit_offer(&self, seller: &Profile) -> TestResult<Offer> {
        let request = self.offer_request().await?;

        let offer = self
            .offers
            .submit_offer(
                seller.uuid,
                NewOffer {
                    uuid: OfferUuid::new(),
                    request,
                    shipping: shipping_details(),
                },
            )
            .await?;

        Ok(offer)
    }

    /// Create a seller, submit an offer and have `admin` accept it.
    pub async fn place_order(&self, seller_email: &str, admin: &Profile) -> TestResult<Order> {
        let seller = self.create_profile(seller_email, Role::User).await?;
        let offer = self.submit_offer(&seller).await?;

        let accepted = self
            .offers
            .accept_offer(admin.actor(), offer.uuid, offer.version)
            .await?;

        Ok(accepted.order)
    }
}
