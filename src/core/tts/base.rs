//! Shared types for the text-to-speech adapters.
//!
//! Every provider implements the same capability interface
//! ([`SpeechSynthesizer`]): a sequence of text chunks plus a chunk-joining
//! policy goes in, and audio comes out either as a lazy byte stream or as
//! local playback, depending on the [`Sink`].

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;
use thiserror::Error;

use crate::core::audio::AudioOutput;

/// Result type for TTS operations.
pub type TtsResult<T> = Result<T, TtsError>;

/// Lazy, finite, single-consumption sequence of audio byte frames.
///
/// Frames arrive in synthesis order; dropping the stream closes the
/// underlying network connection and issues no further provider requests.
pub type AudioStream = Pin<Box<dyn Stream<Item = TtsResult<Bytes>> + Send>>;

/// Errors raised by the synthesis pipeline.
#[derive(Debug, Error)]
pub enum TtsError {
    /// Missing or blank credential, unresolvable required voice, unusable
    /// local audio device. Raised before any network I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Provider rejected the credential (HTTP 401).
    #[error("{provider} authentication failed (401): {detail}")]
    Authentication {
        provider: &'static str,
        detail: String,
    },

    /// Provider does not know the requested voice (HTTP 404).
    #[error("{provider} voice '{voice}' not found")]
    VoiceNotFound {
        provider: &'static str,
        voice: String,
    },

    /// Any other non-success status from the provider.
    #[error("{provider} returned HTTP {status}: {body}")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Network-level failure: connection, timeout, protocol.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The requested format cannot be decoded for local playback. Always
    /// avoidable by switching to stream delivery.
    #[error("format '{format}' cannot be played locally: {hint}")]
    UnsupportedFormat { format: String, hint: String },

    /// Caller input was invalid (e.g. no speakable text).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Chunk-joining policy for a synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkMode {
    /// Join all chunks with single spaces into one request.
    #[default]
    Joined,
    /// One request per chunk, issued strictly in input order. Chunk *i* is
    /// fully delivered before chunk *i + 1* starts.
    PerChunk,
}

impl ChunkMode {
    /// Map the wire-level `stream_mode` flag onto a policy.
    pub fn from_stream_flag(stream_mode: bool) -> Self {
        if stream_mode { Self::PerChunk } else { Self::Joined }
    }
}

/// Where synthesized audio goes.
#[derive(Clone)]
pub enum Sink {
    /// Yield frames to the caller as a lazy byte stream.
    Stream,
    /// Decode and play each request's audio on the given output, blocking
    /// between chunks.
    Play(Arc<dyn AudioOutput>),
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stream => f.write_str("Sink::Stream"),
            Sink::Play(_) => f.write_str("Sink::Play"),
        }
    }
}

/// Outcome of a synthesis call, matching the chosen [`Sink`].
pub enum SynthesisOutput {
    Stream(AudioStream),
    Played,
}

impl SynthesisOutput {
    /// The byte stream, if this was stream delivery.
    pub fn into_stream(self) -> Option<AudioStream> {
        match self {
            SynthesisOutput::Stream(stream) => Some(stream),
            SynthesisOutput::Played => None,
        }
    }
}

/// How a provider's configured output format decodes for local playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSpec {
    Supported(PcmDecode),
    /// Compressed formats pass through opaquely and cannot be played here.
    Unsupported { format: String },
}

/// Decodable sample encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcmDecode {
    /// 16-bit signed little-endian PCM.
    S16Le { sample_rate: u32 },
    /// 8-bit G.711 µ-law.
    Ulaw { sample_rate: u32 },
    /// 8-bit G.711 A-law.
    Alaw { sample_rate: u32 },
}

/// Capability interface implemented by every TTS provider adapter.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `chunks` under the given chunk policy, delivering audio
    /// into `sink`. Errors are never retried here; retry policy belongs to
    /// the caller.
    async fn synthesize(
        &self,
        chunks: &[String],
        mode: ChunkMode,
        sink: &Sink,
    ) -> TtsResult<SynthesisOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_mode_from_flag() {
        assert_eq!(ChunkMode::from_stream_flag(false), ChunkMode::Joined);
        assert_eq!(ChunkMode::from_stream_flag(true), ChunkMode::PerChunk);
    }

    #[test]
    fn test_error_messages_name_the_provider() {
        let err = TtsError::Authentication {
            provider: "elevenlabs",
            detail: "bad key".to_string(),
        };
        assert!(err.to_string().contains("elevenlabs"));

        let err = TtsError::VoiceNotFound {
            provider: "elevenlabs",
            voice: "21m00Tcm4TlvDq8ikWAM".to_string(),
        };
        assert!(err.to_string().contains("21m00Tcm4TlvDq8ikWAM"));
    }

    #[test]
    fn test_unsupported_format_error_is_actionable() {
        let err = TtsError::UnsupportedFormat {
            format: "mp3_44100_128".to_string(),
            hint: "request the byte stream instead".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("mp3_44100_128"));
        assert!(message.contains("byte stream"));
    }
}
