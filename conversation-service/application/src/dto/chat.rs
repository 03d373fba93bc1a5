use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "message must be between 1 and 500 characters"
    ))]
    pub message: String,
}

/// Reply audio only; the reply text stays server-side for text chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Base64-encoded MP3.
    pub audio: String,
}

/// Voice chat echoes what the caller said alongside the reply audio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceChatResponse {
    pub recognized_text: String,
    /// Base64-encoded MP3.
    pub audio: String,
}
