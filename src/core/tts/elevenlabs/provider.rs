//! ElevenLabs TTS provider implementation.
//!
//! Implements [`TtsRequestBuilder`] for the ElevenLabs streaming endpoint:
//! `POST /v1/text-to-speech/{voice_id}/stream` with the `xi-api-key`
//! header, output format and latency hint as query parameters, and voice
//! tuning (stability, similarity boost) in the JSON body.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::voices::resolve_voice_id;
use crate::core::audio::format::sample_rate_for;
use crate::core::tts::base::{
    ChunkMode, PcmDecode, PlaybackSpec, Sink, SpeechSynthesizer, SynthesisOutput, TtsError,
    TtsResult,
};
use crate::core::tts::provider::{TtsRequestBuilder, play_synthesis, stream_synthesis};

/// ElevenLabs API base URL.
pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1";

/// Configuration for one ElevenLabs synthesis adapter.
#[derive(Debug, Clone)]
pub struct ElevenLabsTtsConfig {
    /// API key (must be non-blank).
    pub api_key: String,
    /// Friendly voice name or raw voice id.
    pub voice: String,
    /// Model id passed through to the API (e.g. "eleven_multilingual_v2").
    pub model_id: String,
    /// Output format identifier (e.g. "pcm_44100", "mp3_44100_128").
    pub output_format: String,
    /// Voice stability (0.0 to 1.0).
    pub stability: f32,
    /// Similarity boost (0.0 to 1.0).
    pub similarity_boost: f32,
    /// Streaming latency optimization hint (0-4).
    pub optimize_streaming_latency: Option<u8>,
    /// Whether the provider may log the request.
    pub enable_logging: bool,
}

impl Default for ElevenLabsTtsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice: String::new(),
            model_id: super::DEFAULT_ELEVENLABS_MODEL.to_string(),
            output_format: super::DEFAULT_ELEVENLABS_FORMAT.to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            optimize_streaming_latency: None,
            enable_logging: true,
        }
    }
}

#[derive(Clone)]
struct ElevenLabsRequestBuilder {
    api_base: String,
    api_key: String,
    /// Resolved voice id (friendly names already mapped).
    voice_id: String,
    model_id: String,
    output_format: String,
    stability: f32,
    similarity_boost: f32,
    optimize_streaming_latency: Option<u8>,
    enable_logging: bool,
}

impl TtsRequestBuilder for ElevenLabsRequestBuilder {
    fn provider(&self) -> &'static str {
        "elevenlabs"
    }

    fn voice(&self) -> String {
        self.voice_id.clone()
    }

    fn build_http_request(&self, client: &Client, text: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/text-to-speech/{}/stream",
            self.api_base, self.voice_id
        );

        let mut query: Vec<(&str, String)> = vec![
            ("output_format", self.output_format.clone()),
            ("enable_logging", self.enable_logging.to_string()),
        ];
        if let Some(latency) = self.optimize_streaming_latency {
            query.push(("optimize_streaming_latency", latency.to_string()));
        }

        let body = json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": {
                "stability": self.stability,
                "similarity_boost": self.similarity_boost,
            },
        });

        let mut request = client
            .post(url)
            .query(&query)
            .header("xi-api-key", &self.api_key);

        // Content negotiation hint for the streaming endpoint.
        if let Some(accept) = accept_header(&self.output_format) {
            request = request.header("Accept", accept);
        }

        request.json(&body)
    }

    fn playback_spec(&self) -> PlaybackSpec {
        let format = self.output_format.as_str();
        if format.starts_with("pcm_") {
            let (sample_rate, _) = sample_rate_for(format);
            PlaybackSpec::Supported(PcmDecode::S16Le { sample_rate })
        } else if format.starts_with("ulaw_") {
            PlaybackSpec::Supported(PcmDecode::Ulaw { sample_rate: 8_000 })
        } else if format.starts_with("alaw_") {
            PlaybackSpec::Supported(PcmDecode::Alaw { sample_rate: 8_000 })
        } else {
            PlaybackSpec::Unsupported {
                format: format.to_string(),
            }
        }
    }
}

fn accept_header(output_format: &str) -> Option<&'static str> {
    if output_format.starts_with("pcm_") {
        Some("audio/pcm")
    } else if output_format.starts_with("mp3_") {
        Some("audio/mpeg")
    } else if output_format.starts_with("opus_") {
        Some("audio/opus")
    } else {
        None
    }
}

/// ElevenLabs TTS adapter.
pub struct ElevenLabsTts {
    builder: ElevenLabsRequestBuilder,
    client: Client,
}

impl ElevenLabsTts {
    /// Create a new ElevenLabs adapter. Fails before any network I/O if
    /// the API key is blank or no voice was given.
    pub fn new(config: ElevenLabsTtsConfig, client: Client) -> TtsResult<Self> {
        Self::with_api_base(ELEVENLABS_API_BASE, config, client)
    }

    pub(crate) fn with_api_base(
        api_base: &str,
        config: ElevenLabsTtsConfig,
        client: Client,
    ) -> TtsResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TtsError::Configuration(
                "elevenlabs API key is missing or blank".to_string(),
            ));
        }
        if config.voice.trim().is_empty() {
            return Err(TtsError::Configuration(
                "elevenlabs voice is required: pass a friendly name like 'rachel' or a voice id"
                    .to_string(),
            ));
        }

        Ok(Self {
            builder: ElevenLabsRequestBuilder {
                api_base: api_base.trim_end_matches('/').to_string(),
                api_key: config.api_key.trim().to_string(),
                voice_id: resolve_voice_id(config.voice.trim()),
                model_id: config.model_id,
                output_format: config.output_format,
                stability: config.stability,
                similarity_boost: config.similarity_boost,
                optimize_streaming_latency: config.optimize_streaming_latency,
                enable_logging: config.enable_logging,
            },
            client,
        })
    }

    /// The voice id that will be sent upstream.
    pub fn voice_id(&self) -> &str {
        &self.builder.voice_id
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsTts {
    async fn synthesize(
        &self,
        chunks: &[String],
        mode: ChunkMode,
        sink: &Sink,
    ) -> TtsResult<SynthesisOutput> {
        match sink {
            Sink::Stream => Ok(SynthesisOutput::Stream(stream_synthesis(
                self.client.clone(),
                self.builder.clone(),
                chunks.to_vec(),
                mode,
            ))),
            Sink::Play(output) => {
                let output = Arc::clone(output);
                play_synthesis(&self.client, &self.builder, chunks, mode, &output).await?;
                Ok(SynthesisOutput::Played)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::provider::default_client;

    use futures_util::TryStreamExt;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> ElevenLabsTtsConfig {
        ElevenLabsTtsConfig {
            api_key: "xi-test".to_string(),
            voice: "rachel".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        let config = ElevenLabsTtsConfig {
            api_key: " ".to_string(),
            ..test_config()
        };
        let result = ElevenLabsTts::new(config, default_client().unwrap());
        assert!(matches!(result, Err(TtsError::Configuration(_))));
    }

    #[test]
    fn test_missing_voice_is_a_configuration_error() {
        let config = ElevenLabsTtsConfig {
            voice: String::new(),
            ..test_config()
        };
        let result = ElevenLabsTts::new(config, default_client().unwrap());
        assert!(matches!(result, Err(TtsError::Configuration(_))));
    }

    #[test]
    fn test_friendly_voice_name_is_resolved() {
        let tts = ElevenLabsTts::new(test_config(), default_client().unwrap()).unwrap();
        assert_eq!(tts.voice_id(), "21m00Tcm4TlvDq8ikWAM");
    }

    #[test]
    fn test_raw_voice_id_passes_through() {
        let config = ElevenLabsTtsConfig {
            voice: "customVoiceId42".to_string(),
            ..test_config()
        };
        let tts = ElevenLabsTts::new(config, default_client().unwrap()).unwrap();
        assert_eq!(tts.voice_id(), "customVoiceId42");
    }

    #[test]
    fn test_playback_spec_by_format_family() {
        let builder = |format: &str| ElevenLabsRequestBuilder {
            api_base: ELEVENLABS_API_BASE.to_string(),
            api_key: "k".to_string(),
            voice_id: "v".to_string(),
            model_id: "m".to_string(),
            output_format: format.to_string(),
            stability: 0.5,
            similarity_boost: 0.75,
            optimize_streaming_latency: None,
            enable_logging: true,
        };

        assert_eq!(
            builder("pcm_22050").playback_spec(),
            PlaybackSpec::Supported(PcmDecode::S16Le {
                sample_rate: 22_050
            })
        );
        assert_eq!(
            builder("ulaw_8000").playback_spec(),
            PlaybackSpec::Supported(PcmDecode::Ulaw { sample_rate: 8_000 })
        );
        assert_eq!(
            builder("alaw_8000").playback_spec(),
            PlaybackSpec::Supported(PcmDecode::Alaw { sample_rate: 8_000 })
        );
        assert!(matches!(
            builder("mp3_44100_128").playback_spec(),
            PlaybackSpec::Unsupported { .. }
        ));
        assert!(matches!(
            builder("opus_48000_64").playback_spec(),
            PlaybackSpec::Unsupported { .. }
        ));
    }

    #[tokio::test]
    async fn test_stream_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/21m00Tcm4TlvDq8ikWAM/stream"))
            .and(header("xi-api-key", "xi-test"))
            .and(query_param("output_format", "pcm_44100"))
            .and(query_param("enable_logging", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pcmbytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let tts =
            ElevenLabsTts::with_api_base(&server.uri(), test_config(), default_client().unwrap())
                .unwrap();
        let output = tts
            .synthesize(&["Hello there.".to_string()], ChunkMode::Joined, &Sink::Stream)
            .await
            .unwrap();
        let frames: Vec<bytes::Bytes> = output.into_stream().unwrap().try_collect().await.unwrap();
        assert_eq!(frames.concat(), b"pcmbytes");
    }

    #[tokio::test]
    async fn test_voice_not_found_names_resolved_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = ElevenLabsTtsConfig {
            voice: "noSuchVoice".to_string(),
            ..test_config()
        };
        let tts = ElevenLabsTts::with_api_base(&server.uri(), config, default_client().unwrap())
            .unwrap();
        let output = tts
            .synthesize(&["Hello.".to_string()], ChunkMode::Joined, &Sink::Stream)
            .await
            .unwrap();
        let result: Result<Vec<bytes::Bytes>, _> =
            output.into_stream().unwrap().try_collect().await;
        match result {
            Err(TtsError::VoiceNotFound { provider, voice }) => {
                assert_eq!(provider, "elevenlabs");
                assert_eq!(voice, "noSuchVoice");
            }
            other => panic!("expected voice-not-found error, got {other:?}"),
        }
    }
}
