//! ElevenLabs text-to-speech adapter.

mod provider;
mod voices;

pub use provider::{ELEVENLABS_API_BASE, ElevenLabsTts, ElevenLabsTtsConfig};
pub use voices::{ELEVENLABS_VOICES, resolve_voice_id};

/// Default output format for the ElevenLabs path (playable locally).
pub const DEFAULT_ELEVENLABS_FORMAT: &str = "pcm_44100";

/// Default ElevenLabs model.
pub const DEFAULT_ELEVENLABS_MODEL: &str = "eleven_multilingual_v2";
