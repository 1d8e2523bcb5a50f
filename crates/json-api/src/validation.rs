//! Rendering of field-scoped validation failures.

use salvo::prelude::StatusError;
use tradein::validation::ValidationErrors;

/// `422 Unprocessable Entity` listing every offending field.
pub(crate) fn into_status_error(errors: &ValidationErrors) -> StatusError {
    StatusError::unprocessable_entity()
        .brief("Validation failed")
        .detail(errors.to_string())
}
