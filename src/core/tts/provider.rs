//! Generic HTTP streaming plumbing shared by all TTS adapters.
//!
//! Each provider supplies a [`TtsRequestBuilder`] that knows how to turn one
//! text payload into an authenticated HTTP request and how its configured
//! output format decodes for playback. Everything else lives here: the
//! chunk-joining policy, the lazy generator stream, the playback buffer
//! (whole 16-bit samples only), and the status-code → error mapping.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};

use super::base::{AudioStream, ChunkMode, PcmDecode, PlaybackSpec, TtsError, TtsResult};
use crate::core::audio::AudioOutput;
use crate::core::audio::g711;

/// Total timeout per single synthesis request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect timeout for new provider connections.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Scale factor for converting 16-bit samples to normalized float.
const PCM_TO_FLOAT_SCALE: f32 = 1.0 / 32_768.0;

/// Provider-specific request construction.
pub trait TtsRequestBuilder: Clone + Send + Sync + 'static {
    /// Provider name used in error messages.
    fn provider(&self) -> &'static str;

    /// The voice identifier as resolved for the upstream request, reported
    /// when the provider answers 404.
    fn voice(&self) -> String;

    /// Build the HTTP request for one text payload.
    fn build_http_request(&self, client: &Client, text: &str) -> reqwest::RequestBuilder;

    /// How the configured output format maps onto local playback.
    fn playback_spec(&self) -> PlaybackSpec;
}

/// Build the shared HTTP client used by the adapters.
pub fn default_client() -> TtsResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| TtsError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Send one synthesis request and return the response once its status has
/// been vetted. 401 becomes an authentication error with whatever body text
/// could be captured, 404 a voice-not-found error, any other non-success a
/// generic upstream error.
async fn open_stream<B: TtsRequestBuilder>(
    client: &Client,
    builder: &B,
    text: &str,
) -> TtsResult<reqwest::Response> {
    let response = builder.build_http_request(client, text).send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(TtsError::Authentication {
            provider: builder.provider(),
            detail: read_error_body(response).await,
        });
    }
    if status == StatusCode::NOT_FOUND {
        return Err(TtsError::VoiceNotFound {
            provider: builder.provider(),
            voice: builder.voice(),
        });
    }
    if !status.is_success() {
        return Err(TtsError::Upstream {
            provider: builder.provider(),
            status: status.as_u16(),
            body: read_error_body(response).await,
        });
    }

    Ok(response)
}

/// Best-effort capture of an error response body for diagnostics.
async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => "no additional error details available".to_string(),
        Err(e) => format!("could not read error response: {e}"),
    }
}

/// Produce the lazy generator stream for a synthesis call.
///
/// Requests are issued only as the consumer pulls: abandoning the stream
/// drops the in-flight response (closing the connection) and never issues
/// requests for the remaining chunks. Within the stream, all of chunk *i*'s
/// bytes are yielded before chunk *i + 1*'s request goes out.
pub fn stream_synthesis<B: TtsRequestBuilder>(
    client: Client,
    builder: B,
    chunks: Vec<String>,
    mode: ChunkMode,
) -> AudioStream {
    let stream = async_stream::try_stream! {
        match mode {
            ChunkMode::Joined => {
                let text = chunks.join(" ");
                let mut body = open_stream(&client, &builder, &text).await?.bytes_stream();
                while let Some(piece) = body.next().await {
                    let piece = piece?;
                    if !piece.is_empty() {
                        yield piece;
                    }
                }
            }
            ChunkMode::PerChunk => {
                for chunk in chunks {
                    let text = chunk.trim();
                    if text.is_empty() {
                        continue;
                    }
                    let mut body = open_stream(&client, &builder, text).await?.bytes_stream();
                    while let Some(piece) = body.next().await {
                        let piece = piece?;
                        if !piece.is_empty() {
                            yield piece;
                        }
                    }
                }
            }
        }
    };
    Box::pin(stream)
}

/// Run a synthesis call in playback delivery.
///
/// The format is checked for local decodability before any network call.
/// Each request's bytes are fully buffered, decoded to normalized samples
/// (a trailing odd byte is dropped), and played to completion before the
/// next chunk's request is issued.
pub async fn play_synthesis<B: TtsRequestBuilder>(
    client: &Client,
    builder: &B,
    chunks: &[String],
    mode: ChunkMode,
    output: &Arc<dyn AudioOutput>,
) -> TtsResult<()> {
    let decode = match builder.playback_spec() {
        PlaybackSpec::Supported(decode) => decode,
        PlaybackSpec::Unsupported { format } => {
            return Err(TtsError::UnsupportedFormat {
                format,
                hint: "request the byte stream (generator delivery) and decode downstream"
                    .to_string(),
            });
        }
    };

    match mode {
        ChunkMode::Joined => {
            let text = chunks.join(" ");
            fetch_and_play(client, builder, &text, decode, output).await
        }
        ChunkMode::PerChunk => {
            for chunk in chunks {
                let text = chunk.trim();
                if text.is_empty() {
                    continue;
                }
                fetch_and_play(client, builder, text, decode, output).await?;
            }
            Ok(())
        }
    }
}

async fn fetch_and_play<B: TtsRequestBuilder>(
    client: &Client,
    builder: &B,
    text: &str,
    decode: PcmDecode,
    output: &Arc<dyn AudioOutput>,
) -> TtsResult<()> {
    let mut body = open_stream(client, builder, text).await?.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(piece) = body.next().await {
        buffer.extend_from_slice(&piece?);
    }

    let (samples, sample_rate) = decode_samples(&buffer, decode);
    if samples.is_empty() {
        return Ok(());
    }

    // The sink blocks until the device finishes, so run it off the async
    // executor. The sequential await keeps the device exclusive.
    let sink = Arc::clone(output);
    tokio::task::spawn_blocking(move || sink.play(samples, sample_rate))
        .await
        .map_err(|e| TtsError::Configuration(format!("playback task failed: {e}")))?
        .map_err(|e| TtsError::Configuration(format!("audio output unavailable: {e}")))?;
    Ok(())
}

/// Decode buffered provider bytes into normalized mono samples.
fn decode_samples(data: &[u8], decode: PcmDecode) -> (Vec<f32>, u32) {
    match decode {
        PcmDecode::S16Le { sample_rate } => {
            // Only whole 16-bit samples; an incomplete trailing byte is
            // dropped.
            let whole = data.len() / 2 * 2;
            let samples = data[..whole]
                .chunks_exact(2)
                .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) * PCM_TO_FLOAT_SCALE)
                .collect();
            (samples, sample_rate)
        }
        PcmDecode::Ulaw { sample_rate } => {
            let samples = data
                .iter()
                .map(|&byte| f32::from(g711::ulaw_to_linear(byte)) * PCM_TO_FLOAT_SCALE)
                .collect();
            (samples, sample_rate)
        }
        PcmDecode::Alaw { sample_rate } => {
            let samples = data
                .iter()
                .map(|&byte| f32::from(g711::alaw_to_linear(byte)) * PCM_TO_FLOAT_SCALE)
                .collect();
            (samples, sample_rate)
        }
    }
}
