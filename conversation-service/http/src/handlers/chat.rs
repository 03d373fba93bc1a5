use axum::{extract::State, http::StatusCode, response::Json};

use conversation_application::{ChatRequest, ChatResponse};

use crate::error::{error_mapper, HttpError};
use crate::extract::ValidatedJson;
use crate::AppState;

pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>), HttpError> {
    tracing::info!(
        message_chars = request.message.chars().count(),
        "received chat request"
    );

    match state.usecase.chat(request).await {
        Ok(response) => {
            tracing::info!(audio_chars = response.audio.len(), "chat request completed");
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "chat request failed");
            Err(error_mapper(error))
        }
    }
}
