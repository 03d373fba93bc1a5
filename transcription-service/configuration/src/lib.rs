use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = TranscriptionConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionConfig {
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
    pub stt: SttConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_initial_prompt")]
    pub initial_prompt: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_min_payload_bytes")]
    pub min_payload_bytes: usize,
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

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            language: default_language(),
            initial_prompt: default_initial_prompt(),
            temperature: 0.0,
            threads: default_threads(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            min_payload_bytes: default_min_payload_bytes(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {variable}: {message}")]
    InvalidEnvValue { variable: String, message: String },
}

/// Defaults overridden by `TRANSCRIPTION_SERVICE_*` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = TranscriptionConfig::default();
    override_from_env(&mut config.server.host, "TRANSCRIPTION_SERVICE_HOST")?;
    override_from_env(&mut config.server.port, "TRANSCRIPTION_SERVICE_PORT")?;
    override_from_env(&mut config.logging.level, "TRANSCRIPTION_SERVICE_LOG_LEVEL")?;
    override_from_env(
        &mut config.service.stt.model_path,
        "TRANSCRIPTION_SERVICE_MODEL_PATH",
    )?;
    override_from_env(
        &mut config.service.stt.language,
        "TRANSCRIPTION_SERVICE_LANGUAGE",
    )?;
    override_from_env(
        &mut config.service.stt.threads,
        "TRANSCRIPTION_SERVICE_THREADS",
    )?;
    override_from_env(
        &mut config.service.upload.min_payload_bytes,
        "TRANSCRIPTION_SERVICE_MIN_PAYLOAD_BYTES",
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
    5001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> String {
    "models/ggml-base.bin".to_string()
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_initial_prompt() -> String {
    "한국어로 말하고 있습니다.".to_string()
}

fn default_threads() -> usize {
    4
}

fn default_min_payload_bytes() -> usize {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_deterministic() {
        let cfg = TranscriptionConfig::default();
        assert_eq!(cfg.server.port, 5001);
        assert_eq!(cfg.service.stt.language, "ko");
        assert_eq!(cfg.service.stt.temperature, 0.0);
        assert_eq!(cfg.service.upload.min_payload_bytes, 5_000);
    }
}
