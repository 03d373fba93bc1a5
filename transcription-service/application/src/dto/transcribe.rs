use serde::{Deserialize, Serialize};

/// One uploaded recording, as received from the multipart handler.
#[derive(Debug, Clone)]
pub struct TranscribeAudioRequest {
    pub filename: String,
    pub content_type: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeAudioResponse {
    pub text: String,
    pub language: String,
    pub filename: String,
}
