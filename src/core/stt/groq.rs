//! Groq Whisper transcription client.
//!
//! Groq's transcription API is OpenAI-compatible and serves the fastest
//! Whisper inference available; only the endpoint, credential and default
//! model differ from the OpenAI client.

use async_trait::async_trait;
use reqwest::Client;

use super::base::{
    AudioSource, AuthScheme, SttResult, Transcriber, TranscriptionEndpoint, TranscriptionOptions,
    default_client, require_api_key, transcribe_multipart,
};

/// Groq audio transcription endpoint (OpenAI-compatible).
pub const GROQ_STT_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Default transcription model.
pub const DEFAULT_GROQ_STT_MODEL: &str = "whisper-large-v3-turbo";

/// Groq Whisper STT client.
pub struct GroqStt {
    endpoint: TranscriptionEndpoint,
    api_key: String,
    client: Client,
}

impl GroqStt {
    /// Create a new client. Fails before any network I/O if the API key is
    /// blank.
    pub fn new(api_key: impl Into<String>) -> SttResult<Self> {
        Self::with_url(GROQ_STT_URL, api_key)
    }

    pub(crate) fn with_url(url: &str, api_key: impl Into<String>) -> SttResult<Self> {
        Ok(Self {
            endpoint: TranscriptionEndpoint {
                provider: "groq",
                url: url.to_string(),
                default_model: DEFAULT_GROQ_STT_MODEL,
                auth: AuthScheme::Bearer,
                model_field: "model",
                whisper_params: true,
            },
            api_key: require_api_key("groq", api_key)?,
            client: default_client()?,
        })
    }
}

#[async_trait]
impl Transcriber for GroqStt {
    async fn transcribe(
        &self,
        source: &AudioSource,
        options: &TranscriptionOptions,
    ) -> SttResult<String> {
        transcribe_multipart(&self.client, &self.endpoint, &self.api_key, source, options).await
    }
}
