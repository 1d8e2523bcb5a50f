//! Create Quote Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    quotes::{
        errors::into_status_error,
        models::{QuoteRequestBody, QuoteResponse},
    },
    state::State,
};

/// Create Quote Handler
///
/// Prices a device configuration. A configuration without a condition is
/// answered with an `incomplete` quote rather than an error.
#[endpoint(
    tags("quotes"),
    summary = "Quote Device",
    responses(
        (status_code = StatusCode::OK, description = "Quote computed"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown model, condition or variant"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Inconsistent selection"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequestBody>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let resolved = state
        .app
        .quotes
        .quote(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(resolved.into()))
}
