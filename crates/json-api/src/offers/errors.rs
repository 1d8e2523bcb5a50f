//! Offer Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use tradein::offers::OfferTransitionError;
use tradein_app::domain::offers::OffersServiceError;

use crate::{quotes, validation};

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::AlreadyExists => StatusError::conflict().brief("Offer already exists"),
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found"),
        OffersServiceError::InvalidReference
        | OffersServiceError::MissingRequiredData
        | OffersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid offer payload")
        }
        OffersServiceError::Forbidden => {
            StatusError::forbidden().brief("Administrator role required")
        }
        OffersServiceError::Validation(errors) => validation::into_status_error(&errors),
        OffersServiceError::Quote(source) => quotes::errors::into_status_error(source),
        OffersServiceError::IncompleteConfiguration => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        OffersServiceError::Transition(OfferTransitionError::Expired(expired_at)) => {
            StatusError::gone().brief(format!("Offer expired at {expired_at}"))
        }
        OffersServiceError::Transition(transition) => {
            warn!("rejected offer transition: {transition}");

            StatusError::conflict().brief(transition.to_string())
        }
        OffersServiceError::Conflict { .. } => {
            warn!("{error}");

            StatusError::conflict().brief(error.to_string())
        }
        OffersServiceError::ExpiryOutOfRange(source) => {
            error!("failed to compute offer expiry: {source}");

            StatusError::internal_server_error()
        }
        OffersServiceError::Sql(source) => {
            error!("offer storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
