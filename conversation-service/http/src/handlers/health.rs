use axum::response::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "running",
        "service": "conversation-service",
        "endpoints": {
            "chat": "POST /chat - send a message, receive the persona's spoken reply",
            "voice_chat": "POST /voice-chat - upload a recording, receive text and spoken reply",
        },
    }))
}
