//! Health and service-info endpoints.

use axum::Json;
use serde_json::{Value, json};

/// `GET /v1/health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "vox-gateway" }))
}

/// `GET /` with service information.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "Vox Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/v1/health",
            "models": "/v1/models",
            "voices": "/v1/voices",
            "voice-agent-completions": "/v1/voice-agent-completions",
        },
    }))
}
