use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use conversation_domain::{
    is_supported_media_type, AudioUpload, ChatCompletionPort, SpeechSynthesisPort,
    TranscriberPort, PERSONA_SYSTEM_PROMPT,
};

use crate::{ApplicationError, ChatRequest, ChatResponse, VoiceChatResponse};

#[async_trait]
pub trait ConversationUseCase: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApplicationError>;
    async fn voice_chat(&self, upload: AudioUpload)
        -> Result<VoiceChatResponse, ApplicationError>;
}

pub struct ConversationUseCaseImpl {
    chat: Arc<dyn ChatCompletionPort>,
    speech: Arc<dyn SpeechSynthesisPort>,
    transcriber: Arc<dyn TranscriberPort>,
}

impl ConversationUseCaseImpl {
    pub fn new(
        chat: Arc<dyn ChatCompletionPort>,
        speech: Arc<dyn SpeechSynthesisPort>,
        transcriber: Arc<dyn TranscriberPort>,
    ) -> Self {
        Self {
            chat,
            speech,
            transcriber,
        }
    }

    /// Persona reply for one user message, spoken and Base64-encoded.
    async fn spoken_persona_reply(&self, user_message: &str) -> Result<String, ApplicationError> {
        let reply = self
            .chat
            .reply(PERSONA_SYSTEM_PROMPT, user_message)
            .await?
            .trim()
            .to_string();

        tracing::debug!(reply_chars = reply.chars().count(), "persona reply generated");

        let audio = self.speech.synthesize(&reply).await?;

        tracing::debug!(audio_bytes = audio.len(), "persona reply synthesized");

        Ok(BASE64.encode(audio))
    }
}

#[async_trait]
impl ConversationUseCase for ConversationUseCaseImpl {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApplicationError> {
        tracing::debug!(
            message_chars = request.message.chars().count(),
            "starting text chat"
        );

        let audio = self.spoken_persona_reply(&request.message).await?;
        Ok(ChatResponse { audio })
    }

    async fn voice_chat(
        &self,
        upload: AudioUpload,
    ) -> Result<VoiceChatResponse, ApplicationError> {
        if !is_supported_media_type(&upload.content_type) {
            return Err(ApplicationError::Validation(format!(
                "only audio uploads are accepted; received content type `{}`",
                upload.content_type
            )));
        }

        tracing::debug!(
            filename = %upload.filename,
            content_type = %upload.content_type,
            payload_bytes = upload.bytes.len(),
            "starting voice chat"
        );

        let recognized_text = self.transcriber.transcribe(upload).await?;

        tracing::debug!(
            recognized_chars = recognized_text.chars().count(),
            "voice input recognized"
        );

        let audio = self.spoken_persona_reply(&recognized_text).await?;
        Ok(VoiceChatResponse {
            recognized_text,
            audio,
        })
    }
}
