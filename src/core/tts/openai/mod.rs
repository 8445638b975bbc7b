//! OpenAI text-to-speech adapter.

mod config;
mod provider;

pub use config::AudioOutputFormat;
pub use provider::{OPENAI_TTS_URL, OpenAiTts, OpenAiTtsConfig};

pub(crate) use provider::{OpenAiShapedBuilder, shaped_builder};

/// Voices offered by the OpenAI speech API.
pub const OPENAI_VOICES: &[&str] = &[
    "alloy", "ash", "ballad", "coral", "echo", "fable", "nova", "onyx", "sage", "shimmer",
];

/// Baseline voice used when the caller does not pick one.
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Default model for the OpenAI path.
pub const DEFAULT_OPENAI_MODEL: &str = "tts-1";
