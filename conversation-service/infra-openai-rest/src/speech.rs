use async_trait::async_trait;
use serde::Serialize;

use conversation_domain::{DomainError, SpeechSynthesisPort};

const SERVICE_NAME: &str = "openai-speech";

#[derive(Debug, Clone)]
pub struct OpenAiSpeechConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    /// Below 1.0 slows the voice down, which reads as nervousness.
    pub speed: f32,
}

pub struct OpenAiSpeechSynthesisAdapter {
    client: reqwest::Client,
    config: OpenAiSpeechConfig,
}

impl OpenAiSpeechSynthesisAdapter {
    pub fn new(client: reqwest::Client, config: OpenAiSpeechConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SpeechSynthesisPort for OpenAiSpeechSynthesisAdapter {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomainError> {
        let request = SpeechRequest {
            model: &self.config.model,
            voice: &self.config.voice,
            speed: self.config.speed,
            input: text,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE_NAME, &err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external_service_error(
                SERVICE_NAME,
                &format!("unexpected status {status}: {body}"),
            ));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|err| DomainError::external_service_error(SERVICE_NAME, &err.to_string()))?;

        Ok(audio.to_vec())
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    speed: f32,
    input: &'a str,
    response_format: &'static str,
}
