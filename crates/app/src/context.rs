//! App Context

use std::sync::Arc;

use thiserror::Error;
use tradein::{offers::ExpiryPolicy, pricing::PricingRules};

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        offers::{OffersService, PgOffersService},
        orders::{OrdersService, PgOrdersService},
        profiles::{PgProfilesService, ProfilesService},
        quotes::{PgQuotesService, QuotesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Business rules that are fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub pricing: PricingRules,
    pub expiry: ExpiryPolicy,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub quotes: Arc<dyn QuotesService>,
    pub offers: Arc<dyn OffersService>,
    pub orders: Arc<dyn OrdersService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            quotes: Arc::new(PgQuotesService::new(db.clone(), settings.pricing.clone())),
            offers: Arc::new(PgOffersService::new(
                db.clone(),
                settings.pricing,
                settings.expiry,
            )),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            profiles: Arc::new(PgProfilesService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
