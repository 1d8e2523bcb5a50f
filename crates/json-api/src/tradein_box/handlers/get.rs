//! Get Box Handler

use std::sync::Arc;

use salvo::prelude::*;

use tradein::tradein_box::TradeInBox;

use crate::{
    extensions::*,
    state::State,
    tradein_box::{errors::into_status_error, models::BoxResponse},
};

/// Get Box Handler
///
/// Items in the order they were added, with the running total.
#[endpoint(tags("box"), summary = "Get Trade-in Box")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BoxResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_400()?;

    let summary = TradeInBox::new(state.boxes.session(session))
        .summary()
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
