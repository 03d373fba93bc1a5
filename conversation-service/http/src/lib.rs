pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use conversation_application::ConversationUseCase;

#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<dyn ConversationUseCase>,
}

impl AppState {
    pub fn new(usecase: Arc<dyn ConversationUseCase>) -> Self {
        Self { usecase }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/voice-chat", post(handlers::voice_chat))
        .with_state(state)
}
