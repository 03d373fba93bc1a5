use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "service": "transcription-service",
        "model": state.model,
        "endpoints": {
            "transcribe": "POST /transcribe - upload an audio file, receive recognized text",
        },
    }))
}
