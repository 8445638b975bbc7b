//! ElevenLabs voice name resolution.
//!
//! Friendly names map to the pre-made voice ids below. Anything not in the
//! table passes through unchanged on the assumption that it is already a
//! raw voice id; a bad id surfaces later as the provider's 404.

use phf::phf_map;

/// Friendly name → voice id for common pre-made ElevenLabs voices.
pub static ELEVENLABS_VOICES: phf::Map<&'static str, &'static str> = phf_map! {
    "rachel" => "21m00Tcm4TlvDq8ikWAM",
    "domi" => "AZnzlk1XvdvUeBnXmlld",
    "bella" => "EXAVITQu4vr4xnSDxMaL",
    "antoni" => "ErXwobaYiN019PkySvjV",
    "elli" => "MF3mGyEYCl7XYWbV9V6O",
    "josh" => "TxGEqnHWrfWFTfGW9XjX",
    "arnold" => "VR6AewLTigWG4xSOukaG",
    "adam" => "pNInz6obpgDQGcFmaJgB",
    "sam" => "yoZ06aMxZJJ28mfd3POQ",
    "nicole" => "piTKgcLEGmPE4e6mEKli",
    "glinda" => "z9fAnlkpzviPz146aGWa",
    "giovanni" => "zcAOhNBS3c14rBihAFp1",
    "mimi" => "zrHiDhphv9ZnVXBqCLjz",
    "freya" => "jsCqWAovK2LkecY7zXl4",
    "shimmer" => "onwK4e9ZLuTAKqWW03F9",
    "grace" => "oWAxZDx7w5VEj9dCyTzz",
    "daniel" => "onwK4e9ZLuTAKqWW03F9",
    "lily" => "pFZP5JQG7iQjIQuC4Bku",
    "dorothy" => "ThT5KcBeYPX3keUQqHPh",
    "charlie" => "IKne3meq5aSn9XLyUdCD",
    "fin" => "xrExE9yKIg1WjnnlVkGX",
    "sarah" => "EXAVITQu4vr4xnSDxMaL",
    "michelle" => "flq6f7yk4E4fJM5XTYeZ",
    "ryan" => "wViXBPUzp2ZZixB1xQuM",
    "paul" => "5Q0t7uMcjvnagumLfvZi",
    "drew" => "29vD33N1CtxCmqQRPOHJ",
    "clyde" => "2EiwWnXFnvU5JabPnv8n",
    "dave" => "CYw3kZ02Hs0563khs1Fj",
};

/// Resolve a friendly voice name to its voice id.
///
/// Lookup is case-insensitive. Unresolved names are returned unchanged,
/// so raw voice ids (including custom ones) work without registration.
pub fn resolve_voice_id(voice: &str) -> String {
    ELEVENLABS_VOICES
        .get(voice.to_lowercase().as_str())
        .map(|id| (*id).to_string())
        .unwrap_or_else(|| voice.to_string())
}
