pub mod admin;
pub mod places;
pub mod reservations;

use camara_core::error::CoreError;
use validator::Validate;

use crate::error::AppResult;

/// Run `validator` derive rules on a request body, mapping failures to
/// `VALIDATION_ERROR`.
pub(crate) fn validate_body<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()).into())
}
