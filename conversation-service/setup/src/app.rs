use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Error};

use conversation_application::ConversationUseCaseImpl;
use conversation_configuration::{AppConfig, ServerConfig};
use conversation_http_server::{create_router, AppState};
use conversation_infra_openai_rest::{
    OpenAiChatCompletionAdapter, OpenAiChatConfig, OpenAiSpeechConfig, OpenAiSpeechSynthesisAdapter,
};
use conversation_infra_transcriber_rest::RestTranscriberAdapter;

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
        let openai = &config.service.openai;
        let transcriber = &config.service.transcriber;

        tracing::info!(
            chat_model = %openai.chat_model,
            tts_voice = %openai.tts_voice,
            transcriber_endpoint = %transcriber.endpoint(),
            "initializing conversation application"
        );

        let openai_client = reqwest::Client::new();
        let chat = Arc::new(OpenAiChatCompletionAdapter::new(
            openai_client.clone(),
            OpenAiChatConfig {
                api_key: openai.api_key.clone(),
                base_url: openai.base_url.clone(),
                model: openai.chat_model.clone(),
                temperature: openai.chat_temperature,
            },
        ));
        let speech = Arc::new(OpenAiSpeechSynthesisAdapter::new(
            openai_client,
            OpenAiSpeechConfig {
                api_key: openai.api_key.clone(),
                base_url: openai.base_url.clone(),
                model: openai.tts_model.clone(),
                voice: openai.tts_voice.clone(),
                speed: openai.tts_speed,
            },
        ));

        // A separate client so the transcriber timeout does not apply to
        // OpenAI calls.
        let transcriber_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(transcriber.request_timeout_ms))
            .build()
            .map_err(|err| anyhow!("failed to build transcriber http client: {err}"))?;
        let transcriber = Arc::new(RestTranscriberAdapter::new(
            transcriber_client,
            transcriber.endpoint(),
        ));

        let usecase = Arc::new(ConversationUseCaseImpl::new(chat, speech, transcriber));
        let state = AppState::new(usecase);

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
            "starting conversation http server"
        );

        axum::serve(listener, router)
            .await
            .map_err(|err| anyhow!("conversation http server failed: {err}"))
    }
}
