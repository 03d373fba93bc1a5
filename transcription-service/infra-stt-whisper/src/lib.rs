mod decode;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use transcription_domain::{DomainError, RecognizedSpeech, SttEnginePort};

pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Clone)]
pub struct WhisperEngineConfig {
    pub model_path: String,
    pub language: String,
    pub initial_prompt: String,
    pub temperature: f32,
    pub threads: usize,
}

/// Whisper engine with the model loaded once at construction. Decoding
/// states are created per request; the context itself is never mutated
/// after startup.
pub struct WhisperSttEngine {
    config: WhisperEngineConfig,
    context: Arc<WhisperContext>,
}

impl WhisperSttEngine {
    pub fn new(config: WhisperEngineConfig) -> Result<Self, DomainError> {
        tracing::info!(model_path = %config.model_path, "loading whisper model");
        let context = WhisperContext::new_with_params(
            &config.model_path,
            WhisperContextParameters::default(),
        )
        .map_err(|err| {
            DomainError::internal_error(&format!(
                "failed to load whisper model `{}`: {err}",
                config.model_path
            ))
        })?;
        tracing::info!("whisper model loaded");

        Ok(Self {
            config,
            context: Arc::new(context),
        })
    }

    fn run_inference(
        context: &WhisperContext,
        config: &WhisperEngineConfig,
        path: &Path,
    ) -> Result<RecognizedSpeech, DomainError> {
        let samples = decode::read_mono_16khz(path)?;
        if samples.is_empty() {
            return Err(DomainError::unprocessable_audio(
                "no decodable audio samples in upload",
            ));
        }

        let mut state = context.create_state().map_err(|err| {
            DomainError::internal_error(&format!("failed to create whisper state: {err}"))
        })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(config.threads as i32);
        params.set_language(Some(&config.language));
        // Always transcription, never translation.
        params.set_translate(false);
        params.set_initial_prompt(&config.initial_prompt);
        // Zero temperature keeps decoding deterministic and cuts down on
        // hallucinated filler.
        params.set_temperature(config.temperature);
        params.set_print_realtime(false);
        params.set_print_progress(false);
        params.set_print_timestamps(false);

        state.full(params, &samples).map_err(|err| {
            DomainError::unprocessable_audio(&format!("whisper decode failed: {err}"))
        })?;

        let mut parts = Vec::new();
        for idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(idx) else {
                continue;
            };
            let text = segment
                .to_str_lossy()
                .map(|cow| cow.to_string())
                .unwrap_or_default();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }

        Ok(RecognizedSpeech {
            text: parts.join(" "),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl SttEnginePort for WhisperSttEngine {
    async fn transcribe_file(&self, path: &Path) -> Result<RecognizedSpeech, DomainError> {
        let context = Arc::clone(&self.context);
        let config = self.config.clone();
        let path: PathBuf = path.to_path_buf();

        // Inference is compute-bound and can run for the full clip length;
        // keep it off the request-handling pool.
        tokio::task::spawn_blocking(move || Self::run_inference(&context, &config, &path))
            .await
            .map_err(|err| {
                DomainError::internal_error(&format!("whisper worker task failed: {err}"))
            })?
    }
}
