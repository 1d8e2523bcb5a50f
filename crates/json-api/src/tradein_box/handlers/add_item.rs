//! Add Box Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use tradein::{
    tradein_box::{BoxItem, BoxItemDisplay, BoxSelection, TradeInBox},
    validation::ValidationErrors,
};
use tradein_app::domain::quotes::models::ResolvedQuote;

use crate::{
    extensions::*,
    quotes::{self, models::QuoteRequestBody},
    state::State,
    tradein_box::{errors::into_status_error, models::BoxItemResponse},
    validation,
};

/// Add Box Item Handler
///
/// Prices the configuration and adds it to the box with the quote frozen.
/// Adding the same configuration twice yields two items.
#[endpoint(
    tags("box"),
    summary = "Add Box Item",
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing session"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown model, condition or variant"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Incomplete or inconsistent configuration"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequestBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BoxItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_400()?;
    let body = json.into_inner();

    let resolved = state
        .app
        .quotes
        .quote(body.clone().into())
        .await
        .map_err(quotes::errors::into_status_error)?;

    let item =
        priced_item(&body, resolved).map_err(|errors| validation::into_status_error(&errors))?;

    TradeInBox::new(state.boxes.session(session))
        .add_item(item.clone())
        .map_err(into_status_error)?;

    tracing::info!(
        item_id = %item.id,
        model_uuid = %item.selection.model,
        quoted_price = item.quoted_price,
        "added box item"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}

fn priced_item(
    body: &QuoteRequestBody,
    resolved: ResolvedQuote,
) -> Result<BoxItem, ValidationErrors> {
    let (Some(condition), Some(quoted_price)) = (body.condition, resolved.quote.final_price())
    else {
        return Err(ValidationErrors::single("condition", "is required"));
    };

    let selection = BoxSelection {
        model: body.model,
        condition,
        carrier: body.carrier,
        storage: body.storage,
        has_box: body.has_box,
        has_charger: body.has_charger,
    };

    let display = BoxItemDisplay {
        model_name: resolved.model_name,
        brand: resolved.brand,
        category: resolved.category,
        image_url: resolved.image_url,
        condition_name: resolved.condition_name.unwrap_or_default(),
        carrier_name: resolved.carrier_name,
        storage_name: resolved.storage_name,
    };

    Ok(BoxItem::new(selection, quoted_price, display))
}
