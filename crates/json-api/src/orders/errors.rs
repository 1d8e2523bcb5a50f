//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use tradein_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Administrator role required")
        }
        OrdersServiceError::Transition(_)
        | OrdersServiceError::Conflict { .. }
        | OrdersServiceError::FinalPriceNotAllowed(_) => {
            warn!("rejected order change: {error}");

            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
