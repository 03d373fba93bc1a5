use async_trait::async_trait;

use crate::{AudioUpload, DomainError};

/// Hosted chat-completion capability. Returns the assistant reply text for
/// one persona-framed user message; no conversation history is kept.
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    async fn reply(&self, system_prompt: &str, user_message: &str) -> Result<String, DomainError>;
}

/// Hosted speech-synthesis capability. Returns encoded MP3 bytes.
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomainError>;
}

/// The transcription service, reachable over HTTP. Submits one recording
/// and returns the recognized text.
#[async_trait]
pub trait TranscriberPort: Send + Sync {
    async fn transcribe(&self, upload: AudioUpload) -> Result<String, DomainError>;
}
