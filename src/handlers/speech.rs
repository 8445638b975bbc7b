//! Voice agent completion endpoint: text in, streamed audio out.

use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::text::segment;
use crate::core::tts::{ChunkMode, TtsRequest, response_media_type};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /v1/voice-agent-completions`.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    /// Text to convert to speech.
    pub text: String,
    /// TTS model identifier (e.g. "openai/tts-1",
    /// "elevenlabs/eleven_multilingual_v2").
    #[serde(default = "default_model")]
    pub model: String,
    /// Voice identifier (e.g. "alloy", "rachel"). Defaults per provider.
    #[serde(default)]
    pub voice: Option<String>,
    /// Process chunks one request at a time instead of one joined request.
    #[serde(default)]
    pub stream_mode: bool,
    /// OpenAI-family audio format: "pcm", "mp3", "opus", "aac", "flac".
    #[serde(default)]
    pub response_format: Option<String>,
    /// ElevenLabs voice id (overrides `voice` for ElevenLabs).
    #[serde(default)]
    pub voice_id: Option<String>,
    /// ElevenLabs stability setting (0.0 to 1.0).
    #[serde(default = "default_stability")]
    pub stability: f32,
    /// ElevenLabs similarity boost (0.0 to 1.0).
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
    /// ElevenLabs output format (e.g. "pcm_44100", "mp3_44100_128").
    #[serde(default)]
    pub output_format: Option<String>,
    /// ElevenLabs latency optimization (0-4).
    #[serde(default)]
    pub optimize_streaming_latency: Option<u8>,
}

fn default_model() -> String {
    "openai/tts-1".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

impl CompletionRequest {
    fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(AppError::BadRequest(
                "stability must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(AppError::BadRequest(
                "similarity_boost must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let Some(latency) = self.optimize_streaming_latency
            && latency > 4
        {
            return Err(AppError::BadRequest(
                "optimize_streaming_latency must be between 0 and 4".to_string(),
            ));
        }
        Ok(())
    }
}

/// `POST /v1/voice-agent-completions`
///
/// Segments the text, dispatches to the inferred provider in stream
/// delivery, and forwards the audio bytes as a chunked response body with
/// the `Content-Type` matching the requested format.
pub async fn create_completion(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompletionRequest>,
) -> AppResult<Response> {
    request.validate()?;

    info!(
        model = %request.model,
        voice = request.voice.as_deref().unwrap_or("default"),
        text_length = request.text.len(),
        "processing completion request"
    );

    let chunks = segment(&request.text);
    if chunks.is_empty() {
        return Err(AppError::BadRequest(
            "no valid text chunks after formatting".to_string(),
        ));
    }
    debug!("formatted text into {} chunks", chunks.len());

    let tts_request = TtsRequest {
        model: request.model.clone(),
        voice: request.voice.clone(),
        voice_id: request.voice_id.clone(),
        response_format: request.response_format.clone(),
        output_format: request.output_format.clone(),
        stability: request.stability,
        similarity_boost: request.similarity_boost,
        optimize_streaming_latency: request.optimize_streaming_latency,
        enable_logging: true,
    };
    let media_type = response_media_type(&tts_request);
    let mode = ChunkMode::from_stream_flag(request.stream_mode);

    let stream = state.tts.dispatch_stream(&chunks, &tts_request, mode).await?;

    info!("streaming audio with media type {media_type}");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media_type)
        .header(header::CONTENT_DISPOSITION, "inline; filename=audio")
        .header("x-model", request.model.as_str())
        .header("x-voice", request.voice.as_deref().unwrap_or("default"))
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(e.to_string()))
}
