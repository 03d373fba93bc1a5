use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use transcription_application::TranscriptionUseCaseImpl;
use transcription_domain::{DomainError, RecognizedSpeech, SttEnginePort};
use transcription_http_server::{create_router, AppState};

pub struct ScriptedSttEngine {
    reply: Result<&'static str, &'static str>,
    pub seen_paths: Mutex<Vec<PathBuf>>,
}

impl ScriptedSttEngine {
    pub fn recognizing(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text),
            seen_paths: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(cause: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(cause),
            seen_paths: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.seen_paths.lock().expect("paths lock").len()
    }

    pub fn last_path(&self) -> Option<PathBuf> {
        self.seen_paths.lock().expect("paths lock").last().cloned()
    }
}

#[async_trait]
impl SttEnginePort for ScriptedSttEngine {
    async fn transcribe_file(&self, path: &Path) -> Result<RecognizedSpeech, DomainError> {
        self.seen_paths
            .lock()
            .expect("paths lock")
            .push(path.to_path_buf());
        match self.reply {
            Ok(text) => Ok(RecognizedSpeech {
                text: text.to_string(),
                language: "ko".to_string(),
            }),
            Err(cause) => Err(DomainError::unprocessable_audio(cause)),
        }
    }
}

pub async fn setup_test_server(engine: Arc<ScriptedSttEngine>) -> (String, reqwest::Client) {
    let usecase = Arc::new(TranscriptionUseCaseImpl::new(engine, 5_000));
    let state = AppState::new(usecase, "whisper-base".to_string());
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
