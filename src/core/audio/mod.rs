pub mod format;
pub mod g711;
pub mod playback;

#[cfg(feature = "audio-capture")]
pub mod capture;

pub use format::{DEFAULT_PCM_SAMPLE_RATE, media_type_for, sample_rate_for};
pub use playback::{AudioOutput, PlaybackError};

#[cfg(feature = "playback")]
pub use playback::DeviceOutput;

#[cfg(feature = "audio-capture")]
pub use capture::{CaptureError, record_audio};
