use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::HttpError;

/// JSON extractor that also runs the DTO's `validator` rules, so handlers
/// only ever see requests within bounds.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = HttpError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|err| HttpError::Validation {
                message: format!("invalid request body: {err}"),
            })?;

        value.validate().map_err(|err| HttpError::Validation {
            message: err.to_string(),
        })?;

        Ok(ValidatedJson(value))
    }
}
