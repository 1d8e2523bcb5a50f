//! Quote Errors

use salvo::http::StatusError;
use tracing::error;

use tradein_app::domain::quotes::QuotesServiceError;

pub(crate) fn into_status_error(error: QuotesServiceError) -> StatusError {
    match error {
        QuotesServiceError::ModelNotFound => {
            StatusError::not_found().brief("Device model not found")
        }
        QuotesServiceError::ConditionNotFound => {
            StatusError::not_found().brief("Condition not found")
        }
        QuotesServiceError::VariantNotFound => StatusError::not_found().brief("Variant not found"),
        QuotesServiceError::VariantMismatch
        | QuotesServiceError::VariantNotOffered(_)
        | QuotesServiceError::WrongVariantType { .. }
        | QuotesServiceError::Pricing(_) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        QuotesServiceError::Sql(source) => {
            error!("failed to price configuration: {source}");

            StatusError::internal_server_error()
        }
    }
}
