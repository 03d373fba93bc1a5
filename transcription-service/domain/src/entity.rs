use serde::{Deserialize, Serialize};

/// Output of one speech-to-text engine invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedSpeech {
    pub text: String,
    pub language: String,
}
