//! Text-to-speech: provider adapters, unified dispatch, and the
//! incremental buffering callback.

pub mod base;
pub mod callback;
pub mod catalog;
pub mod dispatch;
pub mod elevenlabs;
pub mod groq;
pub mod openai;
pub mod provider;

// Re-export public types for convenience
pub use base::{
    AudioStream, ChunkMode, PcmDecode, PlaybackSpec, Sink, SpeechSynthesizer, SynthesisOutput,
    TtsError, TtsResult,
};
pub use callback::{
    DEFAULT_MIN_SENTENCE_LENGTH, EngineDispatcher, SentenceDispatcher, StreamingTtsCallback,
};
pub use catalog::{ModelInfo, VoiceInfo, list_models, list_voices};
pub use dispatch::{TtsEngine, TtsProvider, TtsRequest, response_media_type};
pub use elevenlabs::{
    DEFAULT_ELEVENLABS_FORMAT, DEFAULT_ELEVENLABS_MODEL, ELEVENLABS_API_BASE, ELEVENLABS_VOICES,
    ElevenLabsTts, ElevenLabsTtsConfig, resolve_voice_id,
};
pub use groq::{DEFAULT_GROQ_MODEL, DEFAULT_GROQ_VOICE, GROQ_TTS_URL, GROQ_VOICES, GroqTts};
pub use openai::{
    AudioOutputFormat, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_VOICE, OPENAI_TTS_URL, OPENAI_VOICES,
    OpenAiTts, OpenAiTtsConfig,
};
pub use provider::{REQUEST_TIMEOUT_SECS, TtsRequestBuilder};
