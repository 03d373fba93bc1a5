use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use transcription_application::ApplicationError;

#[derive(Debug)]
pub enum HttpError {
    BadRequest { message: String },
    UnprocessableAudio { message: String },
    Internal { message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            HttpError::UnprocessableAudio { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message)
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
        ApplicationError::UnprocessableAudio(message) => {
            HttpError::UnprocessableAudio { message }
        }
        ApplicationError::Internal(message) => HttpError::Internal { message },
    }
}
