//! Quote service errors.

use sqlx::Error;
use thiserror::Error;
use tradein::{catalog::VariantType, pricing::PricingError};

#[derive(Debug, Error)]
pub enum QuotesServiceError {
    #[error("device model not found")]
    ModelNotFound,

    #[error("condition not found")]
    ConditionNotFound,

    #[error("variant not found")]
    VariantNotFound,

    #[error("variant belongs to a different model")]
    VariantMismatch,

    #[error("model does not offer {0} variants")]
    VariantNotOffered(VariantType),

    #[error("expected a {expected} variant")]
    WrongVariantType { expected: VariantType },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for QuotesServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
