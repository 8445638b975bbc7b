//! Unified synthesis dispatch.
//!
//! Infers the provider from the model identifier through an explicit
//! prefix table, fills provider defaults, and delegates to the matching
//! adapter. No network I/O happens here; credentials are injected at
//! engine construction and their absence surfaces as a configuration
//! error at call time.

use std::sync::Arc;

use reqwest::Client;

use super::base::{
    AudioStream, ChunkMode, Sink, SpeechSynthesizer, SynthesisOutput, TtsError, TtsResult,
};
use super::elevenlabs::{DEFAULT_ELEVENLABS_FORMAT, ElevenLabsTts, ElevenLabsTtsConfig};
use super::groq::{DEFAULT_GROQ_VOICE, GroqTts};
use super::openai::{AudioOutputFormat, DEFAULT_OPENAI_VOICE, OpenAiTts, OpenAiTtsConfig};
use super::provider::default_client;
use crate::config::ProviderCredentials;
use crate::core::audio::format::media_type_for;

/// The closed set of supported TTS providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtsProvider {
    OpenAI,
    ElevenLabs,
    Groq,
}

/// Model-prefix routing table. First match wins; anything unmatched falls
/// back to OpenAI for backward compatibility.
const MODEL_PREFIXES: &[(&str, TtsProvider)] = &[
    ("openai/", TtsProvider::OpenAI),
    ("elevenlabs/", TtsProvider::ElevenLabs),
    ("groq/", TtsProvider::Groq),
    ("tts-1", TtsProvider::OpenAI),
    ("gpt-4o-mini-tts", TtsProvider::OpenAI),
    ("eleven_", TtsProvider::ElevenLabs),
    ("playai-tts", TtsProvider::Groq),
    ("canopylabs/", TtsProvider::Groq),
];

/// Provider namespaces stripped from the model id before the upstream
/// request ("openai/tts-1" → "tts-1").
const MODEL_NAMESPACES: &[&str] = &["openai/", "elevenlabs/", "groq/"];

impl TtsProvider {
    /// Infer the provider for a model identifier.
    pub fn infer(model: &str) -> Self {
        let lower = model.to_lowercase();
        for (prefix, provider) in MODEL_PREFIXES {
            if lower.starts_with(prefix) {
                return *provider;
            }
        }
        TtsProvider::OpenAI
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::OpenAI => "openai",
            TtsProvider::ElevenLabs => "elevenlabs",
            TtsProvider::Groq => "groq",
        }
    }
}

impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strip a recognized provider namespace off a model identifier.
fn strip_namespace(model: &str) -> &str {
    for namespace in MODEL_NAMESPACES {
        if model.len() > namespace.len()
            && model[..namespace.len()].eq_ignore_ascii_case(namespace)
        {
            return &model[namespace.len()..];
        }
    }
    model
}

/// One synthesis request, provider-agnostic.
///
/// Provider-specific tuning fields are ignored by the other providers.
#[derive(Debug, Clone)]
pub struct TtsRequest {
    /// Model identifier, optionally namespaced (e.g. "openai/tts-1",
    /// "elevenlabs/eleven_multilingual_v2").
    pub model: String,
    /// Voice name (OpenAI/Groq voice, or ElevenLabs friendly name).
    pub voice: Option<String>,
    /// ElevenLabs raw voice id; takes priority over `voice`.
    pub voice_id: Option<String>,
    /// OpenAI-family output format ("pcm", "mp3", ...).
    pub response_format: Option<String>,
    /// ElevenLabs output format ("pcm_44100", "mp3_44100_128", ...).
    pub output_format: Option<String>,
    /// ElevenLabs voice stability (0.0 to 1.0).
    pub stability: f32,
    /// ElevenLabs similarity boost (0.0 to 1.0).
    pub similarity_boost: f32,
    /// ElevenLabs streaming latency hint (0-4).
    pub optimize_streaming_latency: Option<u8>,
    /// ElevenLabs request logging flag.
    pub enable_logging: bool,
}

impl Default for TtsRequest {
    fn default() -> Self {
        Self {
            model: super::openai::DEFAULT_OPENAI_MODEL.to_string(),
            voice: None,
            voice_id: None,
            response_format: None,
            output_format: None,
            stability: 0.5,
            similarity_boost: 0.75,
            optimize_streaming_latency: None,
            enable_logging: true,
        }
    }
}

/// Media type of the audio a request will produce, for HTTP responses.
pub fn response_media_type(request: &TtsRequest) -> &'static str {
    match TtsProvider::infer(&request.model) {
        TtsProvider::ElevenLabs => media_type_for(
            request
                .output_format
                .as_deref()
                .unwrap_or(DEFAULT_ELEVENLABS_FORMAT),
        ),
        TtsProvider::OpenAI | TtsProvider::Groq => request
            .response_format
            .as_deref()
            .map(AudioOutputFormat::from_str_or_default)
            .unwrap_or_default()
            .mime_type(),
    }
}

/// Synthesis engine: explicit credentials plus a pooled HTTP client.
pub struct TtsEngine {
    credentials: ProviderCredentials,
    client: Client,
}

impl TtsEngine {
    pub fn new(credentials: ProviderCredentials) -> TtsResult<Self> {
        Ok(Self {
            credentials,
            client: default_client()?,
        })
    }

    /// Route a synthesis request to the inferred provider's adapter.
    ///
    /// Within one call, chunk ordering and the delivery contract are those
    /// of the adapter plumbing in the `provider` module; across calls
    /// nothing is ordered.
    pub async fn dispatch(
        &self,
        chunks: &[String],
        request: &TtsRequest,
        mode: ChunkMode,
        sink: &Sink,
    ) -> TtsResult<SynthesisOutput> {
        if chunks.iter().all(|chunk| chunk.trim().is_empty()) {
            return Err(TtsError::Validation(
                "no speakable text provided".to_string(),
            ));
        }

        match TtsProvider::infer(&request.model) {
            TtsProvider::OpenAI => {
                let config = OpenAiTtsConfig {
                    api_key: self.require_key(
                        self.credentials.openai_api_key.as_deref(),
                        "OpenAI",
                        "OPENAI_API_KEY",
                    )?,
                    model: strip_namespace(&request.model).to_string(),
                    voice: request
                        .voice
                        .clone()
                        .unwrap_or_else(|| DEFAULT_OPENAI_VOICE.to_string()),
                    response_format: request
                        .response_format
                        .as_deref()
                        .map(AudioOutputFormat::from_str_or_default)
                        .unwrap_or_default(),
                };
                OpenAiTts::new(config, self.client.clone())?
                    .synthesize(chunks, mode, sink)
                    .await
            }
            TtsProvider::ElevenLabs => {
                let voice = request
                    .voice_id
                    .clone()
                    .or_else(|| request.voice.clone())
                    .ok_or_else(|| {
                        TtsError::Configuration(
                            "either 'voice' or 'voice_id' must be provided for ElevenLabs \
                             models; use a friendly name like 'rachel' or a voice id"
                                .to_string(),
                        )
                    })?;
                let config = ElevenLabsTtsConfig {
                    api_key: self.require_key(
                        self.credentials.elevenlabs_api_key.as_deref(),
                        "ElevenLabs",
                        "ELEVENLABS_API_KEY",
                    )?,
                    voice,
                    model_id: strip_namespace(&request.model).to_string(),
                    output_format: request
                        .output_format
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ELEVENLABS_FORMAT.to_string()),
                    stability: request.stability,
                    similarity_boost: request.similarity_boost,
                    optimize_streaming_latency: request.optimize_streaming_latency,
                    enable_logging: request.enable_logging,
                };
                ElevenLabsTts::new(config, self.client.clone())?
                    .synthesize(chunks, mode, sink)
                    .await
            }
            TtsProvider::Groq => {
                let config = OpenAiTtsConfig {
                    api_key: self.require_key(
                        self.credentials.groq_api_key.as_deref(),
                        "Groq",
                        "GROQ_API_KEY",
                    )?,
                    model: strip_namespace(&request.model).to_string(),
                    voice: request
                        .voice
                        .clone()
                        .unwrap_or_else(|| DEFAULT_GROQ_VOICE.to_string()),
                    response_format: request
                        .response_format
                        .as_deref()
                        .map(AudioOutputFormat::from_str_or_default)
                        .unwrap_or_default(),
                };
                GroqTts::new(config, self.client.clone())?
                    .synthesize(chunks, mode, sink)
                    .await
            }
        }
    }

    /// Dispatch in stream delivery and hand back the byte stream.
    pub async fn dispatch_stream(
        &self,
        chunks: &[String],
        request: &TtsRequest,
        mode: ChunkMode,
    ) -> TtsResult<AudioStream> {
        match self.dispatch(chunks, request, mode, &Sink::Stream).await? {
            SynthesisOutput::Stream(stream) => Ok(stream),
            SynthesisOutput::Played => Err(TtsError::Configuration(
                "stream delivery produced no byte stream".to_string(),
            )),
        }
    }

    fn require_key(
        &self,
        key: Option<&str>,
        provider: &str,
        env_var: &str,
    ) -> TtsResult<String> {
        match key {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(TtsError::Configuration(format!(
                "{provider} API key not provided. Set {env_var} or pass credentials explicitly."
            ))),
        }
    }
}
