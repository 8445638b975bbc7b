//! ElevenLabs Scribe transcription client.
//!
//! File-based transcription through `POST /v1/speech-to-text`. The form
//! field is `model_id` (not `model`) and the response is always JSON with
//! a `text` field, so the Whisper decoding parameters are not sent.

use async_trait::async_trait;
use reqwest::Client;

use super::base::{
    AudioSource, AuthScheme, SttResult, Transcriber, TranscriptionEndpoint, TranscriptionOptions,
    default_client, require_api_key, transcribe_multipart,
};

/// ElevenLabs speech-to-text endpoint.
pub const ELEVENLABS_STT_URL: &str = "https://api.elevenlabs.io/v1/speech-to-text";

/// Default transcription model.
pub const DEFAULT_ELEVENLABS_STT_MODEL: &str = "scribe_v1";

/// ElevenLabs Scribe STT client.
pub struct ElevenLabsStt {
    endpoint: TranscriptionEndpoint,
    api_key: String,
    client: Client,
}

impl ElevenLabsStt {
    /// Create a new client. Fails before any network I/O if the API key is
    /// blank.
    pub fn new(api_key: impl Into<String>) -> SttResult<Self> {
        Self::with_url(ELEVENLABS_STT_URL, api_key)
    }

    pub(crate) fn with_url(url: &str, api_key: impl Into<String>) -> SttResult<Self> {
        Ok(Self {
            endpoint: TranscriptionEndpoint {
                provider: "elevenlabs",
                url: url.to_string(),
                default_model: DEFAULT_ELEVENLABS_STT_MODEL,
                auth: AuthScheme::XiApiKey,
                model_field: "model_id",
                whisper_params: false,
            },
            api_key: require_api_key("elevenlabs", api_key)?,
            client: default_client()?,
        })
    }
}

#[async_trait]
impl Transcriber for ElevenLabsStt {
    async fn transcribe(
        &self,
        source: &AudioSource,
        options: &TranscriptionOptions,
    ) -> SttResult<String> {
        transcribe_multipart(&self.client, &self.endpoint, &self.api_key, source, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stt::base::SttError;

    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        assert!(matches!(
            ElevenLabsStt::new("\t"),
            Err(SttError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_response_is_parsed_as_json_regardless_of_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("xi-api-key", "xi-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"language_code": "en", "text": "scribe transcript", "words": []}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let stt = ElevenLabsStt::with_url(&server.uri(), "xi-test").unwrap();
        let source = AudioSource::Samples {
            data: vec![0i16; 16],
            sample_rate: 16_000,
        };
        // Text format requested, but Scribe always answers JSON.
        let transcript = stt
            .transcribe(&source, &TranscriptionOptions::default())
            .await
            .unwrap();
        assert_eq!(transcript, "scribe transcript");
    }
}
