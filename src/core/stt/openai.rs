//! OpenAI Whisper transcription client.

use async_trait::async_trait;
use reqwest::Client;

use super::base::{
    AudioSource, AuthScheme, SttResult, Transcriber, TranscriptionEndpoint, TranscriptionOptions,
    default_client, require_api_key, transcribe_multipart,
};

/// OpenAI audio transcription endpoint.
pub const OPENAI_STT_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Default transcription model.
pub const DEFAULT_OPENAI_STT_MODEL: &str = "whisper-1";

/// OpenAI Whisper STT client.
pub struct OpenAiStt {
    endpoint: TranscriptionEndpoint,
    api_key: String,
    client: Client,
}

impl OpenAiStt {
    /// Create a new client. Fails before any network I/O if the API key is
    /// blank.
    pub fn new(api_key: impl Into<String>) -> SttResult<Self> {
        Self::with_url(OPENAI_STT_URL, api_key)
    }

    pub(crate) fn with_url(url: &str, api_key: impl Into<String>) -> SttResult<Self> {
        Ok(Self {
            endpoint: TranscriptionEndpoint {
                provider: "openai",
                url: url.to_string(),
                default_model: DEFAULT_OPENAI_STT_MODEL,
                auth: AuthScheme::Bearer,
                model_field: "model",
                whisper_params: true,
            },
            api_key: require_api_key("openai", api_key)?,
            client: default_client()?,
        })
    }
}

#[async_trait]
impl Transcriber for OpenAiStt {
    async fn transcribe(
        &self,
        source: &AudioSource,
        options: &TranscriptionOptions,
    ) -> SttResult<String> {
        transcribe_multipart(&self.client, &self.endpoint, &self.api_key, source, options).await
    }
}
