//! Trade-in Box Errors

use salvo::http::StatusError;
use tracing::error;

use tradein::tradein_box::BoxError;

pub(crate) fn into_status_error(error: BoxError) -> StatusError {
    error!("trade-in box error: {error}");

    StatusError::internal_server_error()
}
