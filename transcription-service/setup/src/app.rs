use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Error};

use transcription_application::TranscriptionUseCaseImpl;
use transcription_configuration::{AppConfig, ServerConfig};
use transcription_domain::SttEnginePort;
use transcription_http_server::{create_router, AppState};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let server_config = config.server.clone();
    let app = Application::new(config)?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        #[cfg(feature = "whisper-runtime")]
        tracing::info!("whisper runtime feature enabled");
        #[cfg(not(feature = "whisper-runtime"))]
        tracing::warn!(
            "service compiled without `whisper-runtime`; transcription will return fallback text"
        );

        tracing::info!(
            model_path = %config.service.stt.model_path,
            language = %config.service.stt.language,
            min_payload_bytes = config.service.upload.min_payload_bytes,
            "initializing transcription application"
        );

        let engine = build_engine(&config)?;
        let usecase = Arc::new(TranscriptionUseCaseImpl::new(
            engine,
            config.service.upload.min_payload_bytes,
        ));
        let state = AppState::new(usecase, model_label(&config));

        Ok(Self { config, state })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        let router = create_router(self.state);
        let listener =
            tokio::net::TcpListener::bind((server_config.host.as_str(), server_config.port))
                .await
                .map_err(|err| {
                    anyhow!(
                        "failed to bind {}:{}: {err}",
                        server_config.host,
                        server_config.port
                    )
                })?;

        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            "starting transcription http server"
        );

        axum::serve(listener, router)
            .await
            .map_err(|err| anyhow!("transcription http server failed: {err}"))
    }
}

#[cfg(feature = "whisper-runtime")]
fn build_engine(config: &AppConfig) -> Result<Arc<dyn SttEnginePort>, Error> {
    use transcription_infra_stt_whisper::{WhisperEngineConfig, WhisperSttEngine};

    let engine = WhisperSttEngine::new(WhisperEngineConfig {
        model_path: config.service.stt.model_path.clone(),
        language: config.service.stt.language.clone(),
        initial_prompt: config.service.stt.initial_prompt.clone(),
        temperature: config.service.stt.temperature,
        threads: config.service.stt.threads,
    })
    .map_err(|err| anyhow!("failed to initialize whisper engine: {err}"))?;
    Ok(Arc::new(engine))
}

#[cfg(not(feature = "whisper-runtime"))]
fn build_engine(config: &AppConfig) -> Result<Arc<dyn SttEnginePort>, Error> {
    Ok(Arc::new(fallback::FallbackSttEngine::new(
        config.service.stt.language.clone(),
    )))
}

fn model_label(config: &AppConfig) -> String {
    if cfg!(feature = "whisper-runtime") {
        Path::new(&config.service.stt.model_path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("whisper")
            .to_string()
    } else {
        "fallback".to_string()
    }
}

#[cfg(not(feature = "whisper-runtime"))]
mod fallback {
    use std::path::Path;

    use async_trait::async_trait;

    use transcription_domain::{DomainError, RecognizedSpeech, SttEnginePort};

    pub struct FallbackSttEngine {
        language: String,
    }

    impl FallbackSttEngine {
        pub fn new(language: String) -> Self {
            Self { language }
        }
    }

    #[async_trait]
    impl SttEnginePort for FallbackSttEngine {
        async fn transcribe_file(&self, path: &Path) -> Result<RecognizedSpeech, DomainError> {
            tracing::warn!(path = %path.display(), "fallback engine invoked; returning placeholder text");
            Ok(RecognizedSpeech {
                text: "(transcription unavailable: built without whisper runtime)".to_string(),
                language: self.language.clone(),
            })
        }
    }
}
