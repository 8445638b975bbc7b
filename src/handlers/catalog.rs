//! Model and voice listing endpoints.

use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::core::tts::{self, ModelInfo, VoiceInfo};

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// `GET /v1/models`
pub async fn list_models() -> Json<ModelsResponse> {
    let models = tts::list_models();
    info!("listing {} models", models.len());
    Json(ModelsResponse { models })
}

/// `GET /v1/voices`
pub async fn list_voices() -> Json<VoicesResponse> {
    let voices = tts::list_voices();
    info!("listing {} voices", voices.len());
    Json(VoicesResponse { voices })
}
