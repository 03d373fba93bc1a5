use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use conversation_application::ApplicationError;

#[derive(Debug)]
pub enum HttpError {
    /// Malformed or out-of-bounds request body.
    Validation { message: String },
    /// Upload rejected before processing (bad media type, missing field).
    BadRequest { message: String },
    /// The transcription service could not be reached.
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            HttpError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            HttpError::ServiceUnavailable { message } => {
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
            HttpError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    match error {
        ApplicationError::Validation(message) => HttpError::BadRequest { message },
        ApplicationError::TranscriberUnavailable { .. } => HttpError::ServiceUnavailable {
            message: error.to_string(),
        },
        ApplicationError::Internal(message) => HttpError::Internal { message },
    }
}
