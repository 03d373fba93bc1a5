use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = ConversationConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub transcriber: TranscriberConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Filled from `OPENAI_API_KEY`; never from defaults.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "default_tts_speed")]
    pub tts_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    #[serde(default = "default_transcriber_host")]
    pub host: String,
    #[serde(default = "default_transcriber_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl TranscriberConfig {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            chat_temperature: default_chat_temperature(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            tts_speed: default_tts_speed(),
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            host: default_transcriber_host(),
            port: default_transcriber_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {message}")]
    InvalidEnvValue { variable: String, message: String },
    #[error("OPENAI_API_KEY is not set; the conversation service cannot start without it")]
    MissingApiKey,
}

/// Defaults overridden by `CONVERSATION_SERVICE_*` environment variables.
/// `OPENAI_API_KEY` is mandatory and has no default.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = ConversationConfig::default();

    config.service.openai.api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    override_from_env(&mut config.server.host, "CONVERSATION_SERVICE_HOST")?;
    override_from_env(&mut config.server.port, "CONVERSATION_SERVICE_PORT")?;
    override_from_env(&mut config.logging.level, "CONVERSATION_SERVICE_LOG_LEVEL")?;
    override_from_env(
        &mut config.service.openai.base_url,
        "CONVERSATION_SERVICE_OPENAI_BASE_URL",
    )?;
    override_from_env(
        &mut config.service.openai.chat_model,
        "CONVERSATION_SERVICE_CHAT_MODEL",
    )?;
    override_from_env(
        &mut config.service.transcriber.host,
        "CONVERSATION_SERVICE_TRANSCRIBER_HOST",
    )?;
    override_from_env(
        &mut config.service.transcriber.port,
        "CONVERSATION_SERVICE_TRANSCRIBER_PORT",
    )?;
    override_from_env(
        &mut config.service.transcriber.request_timeout_ms,
        "CONVERSATION_SERVICE_TRANSCRIBER_TIMEOUT_MS",
    )?;
    Ok(config)
}

pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn override_from_env<T>(target: &mut T, variable: &str) -> Result<(), ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    if let Ok(raw) = std::env::var(variable) {
        *target = raw.parse().map_err(|err| ConfigError::InvalidEnvValue {
            variable: variable.to_string(),
            message: format!("{err}"),
        })?;
    }
    Ok(())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_chat_temperature() -> f32 {
    0.8
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "nova".to_string()
}

fn default_tts_speed() -> f32 {
    0.9
}

fn default_transcriber_host() -> String {
    "127.0.0.1".to_string()
}

fn default_transcriber_port() -> u16 {
    5001
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = ConversationConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.service.openai.chat_model, "gpt-4o-mini");
        assert_eq!(cfg.service.openai.tts_voice, "nova");
        assert_eq!(cfg.service.openai.tts_speed, 0.9);
        assert_eq!(cfg.service.transcriber.request_timeout_ms, 30_000);
    }

    #[test]
    fn transcriber_endpoint_is_formatted_from_host_and_port() {
        let cfg = TranscriberConfig::default();
        assert_eq!(cfg.endpoint(), "http://127.0.0.1:5001");
    }
}
