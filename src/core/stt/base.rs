//! Shared types and plumbing for the speech-to-text clients.
//!
//! All three providers expose REST transcription endpoints that take a
//! multipart upload and return a transcript. Raw samples are packaged into
//! a temporary WAV file that is removed as soon as the request finishes,
//! success or error.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Total timeout per transcription request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Result type for STT operations.
pub type SttResult<T> = Result<T, SttError>;

/// Errors raised by the transcription clients.
#[derive(Debug, Error)]
pub enum SttError {
    /// Missing or blank credential. Raised before any network I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Provider rejected the credential (HTTP 401).
    #[error("{provider} authentication failed (401): {detail}")]
    Authentication {
        provider: &'static str,
        detail: String,
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

    /// Local file error while preparing the upload.
    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV encoding of raw samples failed.
    #[error("failed to encode WAV payload: {0}")]
    Wav(#[from] hound::Error),

    /// The provider's response could not be interpreted.
    #[error("invalid transcription response: {0}")]
    InvalidResponse(String),

    /// Caller input was invalid (e.g. a missing audio file).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Output format of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptFormat {
    /// Plain text (default).
    #[default]
    Text,
    /// JSON with a `text` field.
    Json,
    /// JSON with segments and timestamps; only the `text` field is kept.
    VerboseJson,
    /// SubRip subtitles, returned verbatim.
    Srt,
    /// WebVTT subtitles, returned verbatim.
    Vtt,
}

impl TranscriptFormat {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::VerboseJson => "verbose_json",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    /// Parse from string, with fallback to the default (text).
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" => Self::Text,
            "json" => Self::Json,
            "verbose_json" => Self::VerboseJson,
            "srt" => Self::Srt,
            "vtt" => Self::Vtt,
            _ => Self::default(),
        }
    }
}

/// Audio to transcribe: an existing file, or raw signed 16-bit samples.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Path to an audio file (wav, mp3, m4a, webm, ...).
    File(PathBuf),
    /// Raw mono samples, packaged into a temporary WAV for upload.
    Samples { data: Vec<i16>, sample_rate: u32 },
}

/// Tunable transcription parameters.
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    /// Model identifier; `None` uses the provider's default.
    pub model: Option<String>,
    /// ISO-639-1 language hint; `None` lets the model detect it.
    pub language: Option<String>,
    /// Optional text to guide style or continue a previous segment.
    pub prompt: Option<String>,
    /// Transcript output format.
    pub response_format: TranscriptFormat,
    /// Sampling temperature (0.0 to 1.0).
    pub temperature: f32,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            model: None,
            language: None,
            prompt: None,
            response_format: TranscriptFormat::default(),
            temperature: 0.0,
        }
    }
}

/// Capability interface implemented by every transcription client.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        source: &AudioSource,
        options: &TranscriptionOptions,
    ) -> SttResult<String>;
}

/// Build the HTTP client used by the transcription clients.
pub(crate) fn default_client() -> SttResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| SttError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Validate and trim an API key at construction time.
pub(crate) fn require_api_key(
    provider: &'static str,
    api_key: impl Into<String>,
) -> SttResult<String> {
    let api_key = api_key.into();
    let trimmed = api_key.trim();
    if trimmed.is_empty() {
        return Err(SttError::Configuration(format!(
            "{provider} API key is missing or blank"
        )));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Upload preparation
// =============================================================================

/// An audio payload ready for multipart upload. Holding the temp file
/// guard keeps it alive until the request completes; dropping it deletes
/// the file on every path.
pub(crate) struct Upload {
    pub path: PathBuf,
    _temp: Option<NamedTempFile>,
}

/// Resolve an [`AudioSource`] into an uploadable file.
pub(crate) fn prepare_upload(source: &AudioSource) -> SttResult<Upload> {
    match source {
        AudioSource::File(path) => {
            if !path.exists() {
                return Err(SttError::Validation(format!(
                    "audio file not found: {}",
                    path.display()
                )));
            }
            Ok(Upload {
                path: path.clone(),
                _temp: None,
            })
        }
        AudioSource::Samples { data, sample_rate } => {
            let temp = write_temp_wav(data, *sample_rate)?;
            Ok(Upload {
                path: temp.path().to_path_buf(),
                _temp: Some(temp),
            })
        }
    }
}

/// Write raw mono samples to a temporary WAV file.
pub(crate) fn write_temp_wav(samples: &[i16], sample_rate: u32) -> SttResult<NamedTempFile> {
    let temp = tempfile::Builder::new()
        .prefix("vox-stt-")
        .suffix(".wav")
        .tempfile()?;

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(temp.path(), spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(temp)
}

// =============================================================================
// Multipart transcription request
// =============================================================================

/// Authentication scheme for a transcription endpoint.
#[derive(Debug, Clone, Copy)]
pub(crate) enum AuthScheme {
    /// `Authorization: Bearer <key>` (OpenAI, Groq).
    Bearer,
    /// `xi-api-key: <key>` (ElevenLabs).
    XiApiKey,
}

/// Static description of one provider's transcription endpoint.
pub(crate) struct TranscriptionEndpoint {
    pub provider: &'static str,
    pub url: String,
    pub default_model: &'static str,
    pub auth: AuthScheme,
    /// Form field carrying the model identifier ("model" or "model_id").
    pub model_field: &'static str,
    /// Whether the endpoint accepts Whisper decoding parameters
    /// (response_format, temperature, language, prompt).
    pub whisper_params: bool,
}

/// JSON transcription response; only the transcript is kept.
#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptionResponse {
    pub text: String,
}

/// Upload audio to a transcription endpoint and parse the transcript.
pub(crate) async fn transcribe_multipart(
    client: &Client,
    endpoint: &TranscriptionEndpoint,
    api_key: &str,
    source: &AudioSource,
    options: &TranscriptionOptions,
) -> SttResult<String> {
    // The upload guard lives for the whole request; a temporary WAV is
    // deleted when it drops, including on error.
    let upload = prepare_upload(source)?;

    let file_name = upload
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio.wav".to_string());
    let bytes = tokio::fs::read(&upload.path).await?;
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("audio/wav")
        .map_err(|e| SttError::InvalidResponse(format!("invalid upload mime type: {e}")))?;

    let model = options
        .model
        .clone()
        .unwrap_or_else(|| endpoint.default_model.to_string());
    let mut form = Form::new().part("file", part).text(endpoint.model_field, model);

    if endpoint.whisper_params {
        form = form
            .text("response_format", options.response_format.as_str())
            .text("temperature", options.temperature.to_string());
        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }
        if let Some(prompt) = &options.prompt {
            form = form.text("prompt", prompt.clone());
        }
    }

    let mut request = client.post(&endpoint.url).multipart(form);
    request = match endpoint.auth {
        AuthScheme::Bearer => request.header("Authorization", format!("Bearer {api_key}")),
        AuthScheme::XiApiKey => request.header("xi-api-key", api_key),
    };

    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        let detail = match response.text().await {
            Ok(body) if !body.trim().is_empty() => body,
            Ok(_) => "no additional error details available".to_string(),
            Err(e) => format!("could not read error response: {e}"),
        };
        return Err(SttError::Authentication {
            provider: endpoint.provider,
            detail,
        });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SttError::Upstream {
            provider: endpoint.provider,
            status: status.as_u16(),
            body,
        });
    }

    // ElevenLabs always answers JSON; the Whisper-shaped endpoints answer
    // in the requested format.
    let format = if endpoint.whisper_params {
        options.response_format
    } else {
        TranscriptFormat::Json
    };
    parse_transcript(response, format).await
}

async fn parse_transcript(
    response: reqwest::Response,
    format: TranscriptFormat,
) -> SttResult<String> {
    match format {
        TranscriptFormat::Text => Ok(response.text().await?.trim().to_string()),
        TranscriptFormat::Json | TranscriptFormat::VerboseJson => {
            let parsed: TranscriptionResponse = response
                .json()
                .await
                .map_err(|e| SttError::InvalidResponse(format!("missing 'text' field: {e}")))?;
            Ok(parsed.text)
        }
        TranscriptFormat::Srt | TranscriptFormat::Vtt => Ok(response.text().await?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_format_round_trip() {
        assert_eq!(TranscriptFormat::Text.as_str(), "text");
        assert_eq!(TranscriptFormat::VerboseJson.as_str(), "verbose_json");
        assert_eq!(
            TranscriptFormat::from_str_or_default("srt"),
            TranscriptFormat::Srt
        );
        assert_eq!(
            TranscriptFormat::from_str_or_default("bogus"),
            TranscriptFormat::Text
        );
    }

    #[test]
    fn test_require_api_key_rejects_blank() {
        assert!(require_api_key("openai", "  ").is_err());
        assert_eq!(require_api_key("openai", " sk-x ").unwrap(), "sk-x");
    }

    #[test]
    fn test_write_temp_wav_round_trip() {
        let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN];
        let temp = write_temp_wav(&samples, 16_000).unwrap();

        let mut reader = hound::WavReader::open(temp.path()).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        let read: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_temp_wav_is_deleted_on_drop() {
        let temp = write_temp_wav(&[0i16; 16], 16_000).unwrap();
        let path = temp.path().to_path_buf();
        assert!(path.exists());
        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_a_validation_error() {
        let source = AudioSource::File(PathBuf::from("/definitely/not/here.wav"));
        assert!(matches!(
            prepare_upload(&source),
            Err(SttError::Validation(_))
        ));
    }

    #[test]
    fn test_response_parsing_types() {
        let parsed: TranscriptionResponse =
            serde_json::from_str(r#"{"text": "hello world", "language": "en"}"#).unwrap();
        assert_eq!(parsed.text, "hello world");
    }
}
