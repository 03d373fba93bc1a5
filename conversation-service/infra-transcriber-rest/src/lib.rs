use async_trait::async_trait;
use serde::Deserialize;

use conversation_domain::{AudioUpload, DomainError, TranscriberPort};

const SERVICE_NAME: &str = "transcription-service";

/// HTTP client for the transcription service. The endpoint is injected
/// configuration; the `reqwest::Client` carries the bounded request
/// timeout.
pub struct RestTranscriberAdapter {
    client: reqwest::Client,
    endpoint: String,
}

impl RestTranscriberAdapter {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranscriberPort for RestTranscriberAdapter {
    async fn transcribe(&self, upload: AudioUpload) -> Result<String, DomainError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.content_type)
            .map_err(|err| {
                DomainError::internal_error(&format!("invalid upload content type: {err}"))
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/transcribe", self.endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() || err.is_timeout() {
                    tracing::error!(endpoint = %self.endpoint, error = %err, "transcription service unreachable");
                    DomainError::transcriber_unavailable(&self.endpoint)
                } else {
                    DomainError::external_service_error(SERVICE_NAME, &err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external_service_error(
                SERVICE_NAME,
                &format!("unexpected status {status}: {body}"),
            ));
        }

        let body: TranscribeResponseBody = response
            .json()
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE_NAME, &err.to_string()))?;

        Ok(body.text)
    }
}

#[derive(Deserialize)]
struct TranscribeResponseBody {
    text: String,
}
