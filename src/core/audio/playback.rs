//! Local audio output.
//!
//! The synthesis pipeline never talks to a device directly: it hands
//! normalized mono samples to an [`AudioOutput`] sink that blocks until
//! playback completes. The `playback` feature provides [`DeviceOutput`],
//! which plays through the default system device via rodio; tests and
//! embedders can supply their own sink.

use thiserror::Error;

/// Errors raised by an audio output sink.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to initialize audio output stream")]
    InitFailed,
    #[error("failed to create audio sink")]
    FailedToCreateAudioSink,
}

/// Destination for decoded audio samples.
///
/// `play` receives normalized mono samples in `[-1.0, 1.0]` and must not
/// return until playback has finished: the caller relies on this to keep
/// per-chunk playback strictly sequential.
pub trait AudioOutput: Send + Sync {
    fn play(&self, samples: Vec<f32>, sample_rate: u32) -> Result<(), PlaybackError>;
}

/// Plays samples through the default system output device.
///
/// Opens a fresh output stream per call, which keeps the type `Send + Sync`
/// (platform audio streams are not) and releases the device between chunks.
#[cfg(feature = "playback")]
#[derive(Debug, Default)]
pub struct DeviceOutput;

#[cfg(feature = "playback")]
impl DeviceOutput {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "playback")]
impl AudioOutput for DeviceOutput {
    fn play(&self, samples: Vec<f32>, sample_rate: u32) -> Result<(), PlaybackError> {
        if samples.is_empty() {
            return Ok(());
        }

        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|_| PlaybackError::InitFailed)?;
        let sink = rodio::Sink::connect_new(stream.mixer());

        let source = rodio::buffer::SamplesBuffer::new(1, sample_rate, samples);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}
