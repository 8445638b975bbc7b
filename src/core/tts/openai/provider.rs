//! OpenAI TTS provider implementation.
//!
//! Implements [`TtsRequestBuilder`] for the OpenAI speech API and exposes
//! [`OpenAiTts`] as the adapter. The same request shape is reused by the
//! Groq adapter, which points the builder at Groq's OpenAI-compatible
//! endpoint.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/audio/speech`
//! - Models: tts-1, tts-1-hd, gpt-4o-mini-tts
//! - Output: pcm (24kHz), mp3, opus, aac, flac, wav

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::config::AudioOutputFormat;
use crate::core::tts::base::{
    ChunkMode, PcmDecode, PlaybackSpec, Sink, SpeechSynthesizer, SynthesisOutput, TtsError,
    TtsResult,
};
use crate::core::tts::provider::{TtsRequestBuilder, play_synthesis, stream_synthesis};

/// OpenAI speech API endpoint.
pub const OPENAI_TTS_URL: &str = "https://api.openai.com/v1/audio/speech";

/// Sample rate of OpenAI PCM output.
const OPENAI_PCM_SAMPLE_RATE: u32 = 24_000;

/// Configuration for one OpenAI synthesis adapter.
#[derive(Debug, Clone)]
pub struct OpenAiTtsConfig {
    /// API key (must be non-blank).
    pub api_key: String,
    /// Model identifier passed through to the API (e.g. "tts-1").
    pub model: String,
    /// Voice name (e.g. "alloy").
    pub voice: String,
    /// Requested output format.
    pub response_format: AudioOutputFormat,
}

/// Request builder shared by the OpenAI-shaped providers.
#[derive(Clone)]
pub(crate) struct OpenAiShapedBuilder {
    pub(crate) provider: &'static str,
    pub(crate) endpoint: String,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) voice: String,
    pub(crate) response_format: AudioOutputFormat,
}

impl TtsRequestBuilder for OpenAiShapedBuilder {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn voice(&self) -> String {
        self.voice.clone()
    }

    fn build_http_request(&self, client: &Client, text: &str) -> reqwest::RequestBuilder {
        let body = json!({
            "model": self.model,
            "input": text,
            "voice": self.voice,
            "response_format": self.response_format.as_str(),
        });

        client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
    }

    fn playback_spec(&self) -> PlaybackSpec {
        match self.response_format {
            AudioOutputFormat::Pcm => PlaybackSpec::Supported(PcmDecode::S16Le {
                sample_rate: OPENAI_PCM_SAMPLE_RATE,
            }),
            other => PlaybackSpec::Unsupported {
                format: other.as_str().to_string(),
            },
        }
    }
}

/// OpenAI TTS adapter.
pub struct OpenAiTts {
    builder: OpenAiShapedBuilder,
    client: Client,
}

impl OpenAiTts {
    /// Create a new OpenAI adapter. Fails before any network I/O if the
    /// API key is blank.
    pub fn new(config: OpenAiTtsConfig, client: Client) -> TtsResult<Self> {
        Ok(Self {
            builder: shaped_builder("openai", OPENAI_TTS_URL, config)?,
            client,
        })
    }

    /// The configured output format.
    pub fn response_format(&self) -> AudioOutputFormat {
        self.builder.response_format
    }
}

/// Validate a config into a builder for any OpenAI-shaped endpoint.
pub(crate) fn shaped_builder(
    provider: &'static str,
    endpoint: &str,
    config: OpenAiTtsConfig,
) -> TtsResult<OpenAiShapedBuilder> {
    if config.api_key.trim().is_empty() {
        return Err(TtsError::Configuration(format!(
            "{provider} API key is missing or blank"
        )));
    }
    Ok(OpenAiShapedBuilder {
        provider,
        endpoint: endpoint.to_string(),
        api_key: config.api_key.trim().to_string(),
        model: config.model,
        voice: config.voice,
        response_format: config.response_format,
    })
}

#[async_trait]
impl SpeechSynthesizer for OpenAiTts {
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
