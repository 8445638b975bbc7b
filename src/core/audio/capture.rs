//! Fixed-duration microphone capture.
//!
//! Records from the default input device into signed 16-bit mono/stereo
//! samples, suitable for handing straight to the transcription clients.
//! Only compiled with the `audio-capture` feature.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while capturing audio input.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no input audio device is available")]
    NoInputDevice,
    #[error("failed to query default input configuration: {0}")]
    DefaultInputConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build audio input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

/// Record `duration` of audio from the default microphone.
///
/// Samples are captured at the requested `sample_rate` and `channels`
/// (interleaved when stereo) and returned as signed 16-bit values. The call
/// blocks for the full duration.
pub fn record_audio(
    duration: Duration,
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<i16>, CaptureError> {
    let host = cpal::default_host();
    let device = host.default_input_device().ok_or(CaptureError::NoInputDevice)?;
    let sample_format = device.default_input_config()?.sample_format();

    let config = cpal::StreamConfig {
        channels,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let captured: Arc<Mutex<Vec<i16>>> = Arc::new(Mutex::new(Vec::new()));
    let err_fn = |err: cpal::StreamError| tracing::warn!("audio input stream error: {err}");

    let stream = match sample_format {
        cpal::SampleFormat::I16 => {
            let sink = Arc::clone(&captured);
            device.build_input_stream(
                &config,
                move |data: &[i16], _| sink.lock().unwrap().extend_from_slice(data),
                err_fn,
                None,
            )?
        }
        cpal::SampleFormat::F32 => {
            let sink = Arc::clone(&captured);
            device.build_input_stream(
                &config,
                move |data: &[f32], _| {
                    let mut buffer = sink.lock().unwrap();
                    buffer.extend(
                        data.iter()
                            .map(|&sample| (sample.clamp(-1.0, 1.0) * 32_767.0) as i16),
                    );
                },
                err_fn,
                None,
            )?
        }
        cpal::SampleFormat::U16 => {
            let sink = Arc::clone(&captured);
            device.build_input_stream(
                &config,
                move |data: &[u16], _| {
                    let mut buffer = sink.lock().unwrap();
                    buffer.extend(data.iter().map(|&sample| (sample as i32 - 32_768) as i16));
                },
                err_fn,
                None,
            )?
        }
        other => return Err(CaptureError::UnsupportedSampleFormat(other)),
    };

    info!("recording for {:.1} seconds", duration.as_secs_f32());
    stream.play()?;
    std::thread::sleep(duration);
    drop(stream);

    let mut samples = std::mem::take(&mut *captured.lock().unwrap());

    // Clip to the exact requested length in case the device delivered extra
    // frames before the stream shut down.
    let expected = (duration.as_secs_f64() * f64::from(sample_rate)) as usize * usize::from(channels);
    samples.truncate(expected);
    info!("recording finished ({} samples)", samples.len());
    Ok(samples)
}
