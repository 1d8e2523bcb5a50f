//! Password Check Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use tradein::validation::validate_password_change;

use crate::{extensions::*, validation};

/// Password Check Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct PasswordCheckRequest {
    pub password: String,
    pub password_confirmation: String,
}

impl std::fmt::Debug for PasswordCheckRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordCheckRequest(**redacted**)")
    }
}

impl Drop for PasswordCheckRequest {
    fn drop(&mut self) {
        self.password.zeroize();
        self.password_confirmation.zeroize();
    }
}

/// Password Check Handler
///
/// Applies the local password rules before a change is handed to the identity
/// provider. Nothing is stored.
#[endpoint(
    tags("profiles"),
    summary = "Check New Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Password acceptable"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Password rejected"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PasswordCheckRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let actor = depot.actor_or_401()?;
    let request = json.into_inner();

    validate_password_change(&request.password, &request.password_confirmation).map_err(
        |errors| {
            tracing::debug!(profile = %actor.profile, "new password rejected");

            validation::into_status_error(&errors)
        },
    )?;

    Ok(StatusCode::NO_CONTENT)
}
