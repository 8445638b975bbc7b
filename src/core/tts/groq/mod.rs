//! Groq text-to-speech adapter.
//!
//! Groq serves PlayAI/Orpheus voices through an OpenAI-compatible speech
//! endpoint, so this adapter is a second instance of the OpenAI-shaped
//! request builder with Groq's endpoint, credential and defaults.

use async_trait::async_trait;
use reqwest::Client;

use super::base::{ChunkMode, Sink, SpeechSynthesizer, SynthesisOutput, TtsResult};
use super::openai::{OpenAiShapedBuilder, OpenAiTtsConfig, shaped_builder};
use super::provider::{play_synthesis, stream_synthesis};

/// Groq speech API endpoint (OpenAI-compatible).
pub const GROQ_TTS_URL: &str = "https://api.groq.com/openai/v1/audio/speech";

/// Voices offered by the Orpheus models on Groq.
pub const GROQ_VOICES: &[&str] = &[
    "austin", "tara", "leah", "jess", "leo", "dan", "mia", "zac", "zoe",
];

/// Baseline voice used when the caller does not pick one.
pub const DEFAULT_GROQ_VOICE: &str = "austin";

/// Default model for the Groq path.
pub const DEFAULT_GROQ_MODEL: &str = "playai-tts";

/// Groq TTS adapter.
pub struct GroqTts {
    builder: OpenAiShapedBuilder,
    client: Client,
}

impl GroqTts {
    /// Create a new Groq adapter. Fails before any network I/O if the API
    /// key is blank.
    pub fn new(config: OpenAiTtsConfig, client: Client) -> TtsResult<Self> {
        Ok(Self {
            builder: shaped_builder("groq", GROQ_TTS_URL, config)?,
            client,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GroqTts {
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
                let output = std::sync::Arc::clone(output);
                play_synthesis(&self.client, &self.builder, chunks, mode, &output).await?;
                Ok(SynthesisOutput::Played)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::base::TtsError;
    use crate::core::tts::openai::AudioOutputFormat;
    use crate::core::tts::provider::default_client;

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        let config = OpenAiTtsConfig {
            api_key: String::new(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            voice: DEFAULT_GROQ_VOICE.to_string(),
            response_format: AudioOutputFormat::Pcm,
        };
        let result = GroqTts::new(config, default_client().unwrap());
        assert!(matches!(result, Err(TtsError::Configuration(_))));
    }

    #[test]
    fn test_default_voice_is_listed() {
        assert!(GROQ_VOICES.contains(&DEFAULT_GROQ_VOICE));
    }
}
