use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};

use transcription_application::{TranscribeAudioRequest, TranscribeAudioResponse};

use crate::error::{error_mapper, HttpError};
use crate::AppState;

pub async fn transcribe_audio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<TranscribeAudioResponse>), HttpError> {
    let request = read_upload(multipart).await?;

    tracing::info!(
        filename = %request.filename,
        content_type = %request.content_type,
        payload_bytes = request.payload.len(),
        "received transcribe request"
    );

    match state.usecase.transcribe(request).await {
        Ok(response) => {
            tracing::info!(
                text_chars = response.text.chars().count(),
                "transcribe request completed"
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "transcribe request failed");
            Err(error_mapper(error))
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<TranscribeAudioRequest, HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        HttpError::BadRequest {
            message: format!("malformed multipart body: {err}"),
        }
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let payload = field
            .bytes()
            .await
            .map_err(|err| HttpError::BadRequest {
                message: format!("failed to read upload: {err}"),
            })?
            .to_vec();

        return Ok(TranscribeAudioRequest {
            filename,
            content_type,
            payload,
        });
    }

    Err(HttpError::BadRequest {
        message: "multipart field `file` is required".to_string(),
    })
}
