use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;

use transcription_domain::{
    file_extension_for, is_supported_media_type, SttEnginePort,
};

use crate::{ApplicationError, TranscribeAudioRequest, TranscribeAudioResponse};

#[async_trait]
pub trait TranscriptionUseCase: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscribeAudioRequest,
    ) -> Result<TranscribeAudioResponse, ApplicationError>;
}

pub struct TranscriptionUseCaseImpl {
    engine: Arc<dyn SttEnginePort>,
    min_payload_bytes: usize,
}

impl TranscriptionUseCaseImpl {
    pub fn new(engine: Arc<dyn SttEnginePort>, min_payload_bytes: usize) -> Self {
        Self {
            engine,
            min_payload_bytes,
        }
    }
}

#[async_trait]
impl TranscriptionUseCase for TranscriptionUseCaseImpl {
    async fn transcribe(
        &self,
        request: TranscribeAudioRequest,
    ) -> Result<TranscribeAudioResponse, ApplicationError> {
        let TranscribeAudioRequest {
            filename,
            content_type,
            payload,
        } = request;

        if !is_supported_media_type(&content_type) {
            return Err(ApplicationError::Validation(format!(
                "only audio uploads are accepted; received content type `{content_type}`"
            )));
        }

        if payload.len() < self.min_payload_bytes {
            return Err(ApplicationError::Validation(format!(
                "audio payload is too small ({} bytes); at least {} bytes are required",
                payload.len(),
                self.min_payload_bytes
            )));
        }

        tracing::debug!(
            filename = %filename,
            content_type = %content_type,
            payload_bytes = payload.len(),
            "starting transcription"
        );

        // The engine reads from disk; the guard removes the scratch file on
        // every exit path, including engine failures.
        let scratch = write_scratch_file(&payload, file_extension_for(&content_type))?;

        let recognized = match self.engine.transcribe_file(scratch.path()).await {
            Ok(recognized) => recognized,
            Err(error) => {
                tracing::error!(error = %error, filename = %filename, "stt engine failed");
                return Err(error.into());
            }
        };

        let response = TranscribeAudioResponse {
            text: recognized.text.trim().to_string(),
            language: recognized.language,
            filename,
        };

        tracing::debug!(
            text_chars = response.text.chars().count(),
            language = %response.language,
            "transcription completed"
        );

        Ok(response)
    }
}

fn write_scratch_file(
    payload: &[u8],
    extension: &str,
) -> Result<tempfile::NamedTempFile, ApplicationError> {
    let mut scratch = tempfile::Builder::new()
        .prefix("transcription-upload-")
        .suffix(extension)
        .tempfile()
        .map_err(|err| {
            ApplicationError::Internal(format!("failed to create scratch file: {err}"))
        })?;
    scratch
        .write_all(payload)
        .and_then(|()| scratch.flush())
        .map_err(|err| {
            ApplicationError::Internal(format!("failed to write scratch file: {err}"))
        })?;
    Ok(scratch)
}
