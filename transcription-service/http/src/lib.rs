pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use transcription_application::TranscriptionUseCase;

#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<dyn TranscriptionUseCase>,
    pub model: String,
}

impl AppState {
    pub fn new(usecase: Arc<dyn TranscriptionUseCase>, model: String) -> Self {
        Self { usecase, model }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/transcribe", post(handlers::transcribe_audio))
        .with_state(state)
}
