//! Profile Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use tradein_app::domain::profiles::ProfilesServiceError;

use crate::validation;

pub(crate) fn into_status_error(error: ProfilesServiceError) -> StatusError {
    match error {
        ProfilesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Profile already exists")
        }
        ProfilesServiceError::NotFound => StatusError::not_found().brief("Profile not found"),
        ProfilesServiceError::InvalidReference
        | ProfilesServiceError::MissingRequiredData
        | ProfilesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        ProfilesServiceError::Validation(errors) => validation::into_status_error(&errors),
        ProfilesServiceError::RoleChange(reason) => {
            warn!("rejected role change: {reason}");

            StatusError::forbidden().brief(reason.to_string())
        }
        ProfilesServiceError::Sql(source) => {
            error!("profile storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
