//! Offers service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tradein::{offers::OfferTransitionError, validation::ValidationErrors};

use crate::domain::quotes::QuotesServiceError;

#[derive(Debug, Error)]
pub enum OffersServiceError {
    #[error("offer already exists")]
    AlreadyExists,

    #[error("offer not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("administrator role required")]
    Forbidden,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Quote(#[from] QuotesServiceError),

    #[error("a condition must be selected before submitting an offer")]
    IncompleteConfiguration,

    #[error(transparent)]
    Transition(#[from] OfferTransitionError),

    #[error("offer was modified concurrently (expected version {expected}, found {actual})")]
    Conflict { expected: i64, actual: i64 },

    #[error("offer expiry is out of range")]
    ExpiryOutOfRange(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OffersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use tradein::offers::OfferStatus;

    use super::*;

    #[test]
    fn transition_errors_keep_their_message() {
        let error = OffersServiceError::from(OfferTransitionError::Terminal(OfferStatus::Accepted));

        assert_eq!(error.to_string(), "offer is already accepted");
    }
}
