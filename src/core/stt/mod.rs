//! Speech-to-text: REST transcription clients for the supported providers.

pub mod base;
pub mod elevenlabs;
pub mod groq;
pub mod openai;

// Re-export public types and traits
pub use base::{
    AudioSource, SttError, SttResult, Transcriber, TranscriptFormat, TranscriptionOptions,
};
pub use elevenlabs::{DEFAULT_ELEVENLABS_STT_MODEL, ELEVENLABS_STT_URL, ElevenLabsStt};
pub use groq::{DEFAULT_GROQ_STT_MODEL, GROQ_STT_URL, GroqStt};
pub use openai::{DEFAULT_OPENAI_STT_MODEL, OPENAI_STT_URL, OpenAiStt};

/// Supported STT providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SttProvider {
    /// OpenAI Whisper REST API
    OpenAI,
    /// Groq Whisper REST API (ultra-fast)
    Groq,
    /// ElevenLabs Scribe REST API
    ElevenLabs,
}

impl std::fmt::Display for SttProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SttProvider::OpenAI => write!(f, "openai"),
            SttProvider::Groq => write!(f, "groq"),
            SttProvider::ElevenLabs => write!(f, "elevenlabs"),
        }
    }
}

impl std::str::FromStr for SttProvider {
    type Err = SttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(SttProvider::OpenAI),
            "groq" => Ok(SttProvider::Groq),
            "elevenlabs" => Ok(SttProvider::ElevenLabs),
            _ => Err(SttError::Configuration(format!(
                "Unsupported STT provider: {s}. Supported providers: openai, groq, elevenlabs"
            ))),
        }
    }
}

/// Factory function to create a transcription client by provider name.
pub fn create_transcriber(
    provider: &str,
    api_key: impl Into<String>,
) -> SttResult<Box<dyn Transcriber>> {
    match provider.parse::<SttProvider>()? {
        SttProvider::OpenAI => Ok(Box::new(OpenAiStt::new(api_key)?)),
        SttProvider::Groq => Ok(Box::new(GroqStt::new(api_key)?)),
        SttProvider::ElevenLabs => Ok(Box::new(ElevenLabsStt::new(api_key)?)),
    }
}

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn test_provider_from_string() {
        assert_eq!("openai".parse::<SttProvider>().unwrap(), SttProvider::OpenAI);
        assert_eq!("GROQ".parse::<SttProvider>().unwrap(), SttProvider::Groq);
        assert_eq!(
            "ElevenLabs".parse::<SttProvider>().unwrap(),
            SttProvider::ElevenLabs
        );

        let result = "invalid".parse::<SttProvider>();
        assert!(result.is_err());
        if let Err(SttError::Configuration(message)) = result {
            assert!(message.contains("Unsupported STT provider: invalid"));
        }
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(SttProvider::OpenAI.to_string(), "openai");
        assert_eq!(SttProvider::Groq.to_string(), "groq");
        assert_eq!(SttProvider::ElevenLabs.to_string(), "elevenlabs");
    }

    #[test]
    fn test_create_transcriber() {
        assert!(create_transcriber("openai", "key").is_ok());
        assert!(create_transcriber("groq", "key").is_ok());
        assert!(create_transcriber("elevenlabs", "key").is_ok());
        assert!(create_transcriber("unknown", "key").is_err());
        // Empty key fails at construction, before any network I/O.
        assert!(create_transcriber("openai", "").is_err());
    }
}
