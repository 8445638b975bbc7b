//! Model and voice catalogs for the listing endpoints.

use serde::Serialize;

use super::elevenlabs::ELEVENLABS_VOICES;
use super::groq::GROQ_VOICES;
use super::openai::OPENAI_VOICES;

/// One TTS model with its provider.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub provider: &'static str,
}

/// One TTS voice with its provider and, where applicable, raw voice id.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub name: &'static str,
    pub provider: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<&'static str>,
}

/// All models the dispatcher can route.
pub fn list_models() -> Vec<ModelInfo> {
    let mut models = Vec::new();
    for id in ["tts-1", "tts-1-hd", "gpt-4o-mini-tts"] {
        models.push(ModelInfo {
            id,
            provider: "openai",
        });
    }
    for id in [
        "eleven_multilingual_v2",
        "eleven_turbo_v2",
        "eleven_flash_v2_5",
        "eleven_monolingual_v1",
    ] {
        models.push(ModelInfo {
            id,
            provider: "elevenlabs",
        });
    }
    for id in ["playai-tts", "canopylabs/orpheus-v1-english"] {
        models.push(ModelInfo { id, provider: "groq" });
    }
    models
}

/// All voices across providers.
///
/// ElevenLabs voices are sorted by name for a stable listing.
pub fn list_voices() -> Vec<VoiceInfo> {
    let mut voices: Vec<VoiceInfo> = OPENAI_VOICES
        .iter()
        .map(|&name| VoiceInfo {
            name,
            provider: "openai",
            voice_id: None,
        })
        .collect();

    let mut elevenlabs: Vec<VoiceInfo> = ELEVENLABS_VOICES
        .entries()
        .map(|(&name, &id)| VoiceInfo {
            name,
            provider: "elevenlabs",
            voice_id: Some(id),
        })
        .collect();
    elevenlabs.sort_by_key(|voice| voice.name);
    voices.extend(elevenlabs);

    voices.extend(GROQ_VOICES.iter().map(|&name| VoiceInfo {
        name,
        provider: "groq",
        voice_id: None,
    }));

    voices
}
