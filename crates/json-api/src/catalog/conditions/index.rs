//! Condition Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, models::ConditionResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConditionsResponse {
    /// Condition tiers in display order
    pub conditions: Vec<ConditionResponse>,
}

/// Condition Index Handler
#[endpoint(tags("catalog"), summary = "List Conditions")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ConditionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let conditions = state
        .app
        .catalog
        .list_conditions()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ConditionsResponse {
        conditions: conditions.into_iter().map(Into::into).collect(),
    }))
}
