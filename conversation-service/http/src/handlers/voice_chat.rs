use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};

use conversation_application::VoiceChatResponse;
use conversation_domain::AudioUpload;

use crate::error::{error_mapper, HttpError};
use crate::AppState;

pub async fn voice_chat(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<VoiceChatResponse>), HttpError> {
    let upload = read_upload(multipart).await?;

    tracing::info!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        payload_bytes = upload.bytes.len(),
        "received voice chat request"
    );

    match state.usecase.voice_chat(upload).await {
        Ok(response) => {
            tracing::info!(
                recognized_chars = response.recognized_text.chars().count(),
                "voice chat request completed"
            );
            Ok((StatusCode::OK, Json(response)))
        }
        Err(error) => {
            tracing::error!(error = %error, "voice chat request failed");
            Err(error_mapper(error))
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<AudioUpload, HttpError> {
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
        let bytes = field
            .bytes()
            .await
            .map_err(|err| HttpError::BadRequest {
                message: format!("failed to read upload: {err}"),
            })?
            .to_vec();

        return Ok(AudioUpload {
            filename,
            content_type,
            bytes,
        });
    }

    Err(HttpError::BadRequest {
        message: "multipart field `file` is required".to_string(),
    })
}
