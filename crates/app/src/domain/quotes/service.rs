//! Quotes service.

use async_trait::async_trait;
use mockall::automock;
use tradein::pricing::PricingRules;

use crate::{
    database::Db,
    domain::quotes::{
        errors::QuotesServiceError,
        models::{QuoteRequest, ResolvedQuote},
        resolver::QuoteResolver,
    },
};

#[derive(Debug, Clone)]
pub struct PgQuotesService {
    db: Db,
    resolver: QuoteResolver,
}

impl PgQuotesService {
    #[must_use]
    pub fn new(db: Db, rules: PricingRules) -> Self {
        Self {
            db,
            resolver: QuoteResolver::new(rules),
        }
    }
}

#[async_trait]
impl QuotesService for PgQuotesService {
    async fn quote(&self, request: QuoteRequest) -> Result<ResolvedQuote, QuotesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let resolved = self.resolver.resolve(&mut tx, &request).await?;

        tx.commit().await?;

        Ok(resolved)
    }
}

#[automock]
#[async_trait]
pub trait QuotesService: Send + Sync {
    /// Price a configuration against the current catalog.
    ///
    /// A configuration without a condition yields an incomplete quote rather than an error.
    async fn quote(&self, request: QuoteRequest) -> Result<ResolvedQuote, QuotesServiceError>;
}
