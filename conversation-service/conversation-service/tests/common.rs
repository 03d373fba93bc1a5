#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use conversation_application::ConversationUseCaseImpl;
use conversation_domain::{
    AudioUpload, ChatCompletionPort, DomainError, SpeechSynthesisPort, TranscriberPort,
};
use conversation_http_server::{create_router, AppState};

pub const FAKE_MP3: &[u8] = b"FAKEMP3";
pub const FAKE_MP3_BASE64: &str = "RkFLRU1QMw==";

pub struct ScriptedChatPort {
    reply: Result<&'static str, &'static str>,
    pub seen_messages: Mutex<Vec<(String, String)>>,
}

impl ScriptedChatPort {
    pub fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text),
            seen_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(cause: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(cause),
            seen_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.seen_messages.lock().expect("messages lock").len()
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.seen_messages
            .lock()
            .expect("messages lock")
            .last()
            .map(|(_, user)| user.clone())
    }
}

#[async_trait]
impl ChatCompletionPort for ScriptedChatPort {
    async fn reply(&self, system_prompt: &str, user_message: &str) -> Result<String, DomainError> {
        self.seen_messages
            .lock()
            .expect("messages lock")
            .push((system_prompt.to_string(), user_message.to_string()));
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(cause) => Err(DomainError::external_service_error("openai-chat", cause)),
        }
    }
}

pub struct ScriptedSpeechPort {
    pub seen_inputs: Mutex<Vec<String>>,
}

impl ScriptedSpeechPort {
    pub fn returning_fake_mp3() -> Arc<Self> {
        Arc::new(Self {
            seen_inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.seen_inputs.lock().expect("inputs lock").len()
    }

    pub fn last_input(&self) -> Option<String> {
        self.seen_inputs.lock().expect("inputs lock").last().cloned()
    }
}

#[async_trait]
impl SpeechSynthesisPort for ScriptedSpeechPort {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, DomainError> {
        self.seen_inputs
            .lock()
            .expect("inputs lock")
            .push(text.to_string());
        Ok(FAKE_MP3.to_vec())
    }
}

pub struct ScriptedTranscriberPort {
    text: &'static str,
    pub seen_uploads: Mutex<Vec<AudioUpload>>,
}

impl ScriptedTranscriberPort {
    pub fn recognizing(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            text,
            seen_uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.seen_uploads.lock().expect("uploads lock").len()
    }
}

#[async_trait]
impl TranscriberPort for ScriptedTranscriberPort {
    async fn transcribe(&self, upload: AudioUpload) -> Result<String, DomainError> {
        self.seen_uploads.lock().expect("uploads lock").push(upload);
        Ok(self.text.to_string())
    }
}

pub async fn setup_test_server(
    chat: Arc<dyn ChatCompletionPort>,
    speech: Arc<dyn SpeechSynthesisPort>,
    transcriber: Arc<dyn TranscriberPort>,
) -> (String, reqwest::Client) {
    let usecase = Arc::new(ConversationUseCaseImpl::new(chat, speech, transcriber));
    let state = AppState::new(usecase);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });

    (format!("http://{addr}"), reqwest::Client::new())
}

pub fn audio_upload_form(
    payload: Vec<u8>,
    filename: &str,
    content_type: &str,
) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(payload)
        .file_name(filename.to_string())
        .mime_str(content_type)
        .expect("valid mime type");
    reqwest::multipart::Form::new().part("file", part)
}
