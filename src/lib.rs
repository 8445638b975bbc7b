pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::{ProviderCredentials, ServerConfig};
pub use core::audio::{AudioOutput, PlaybackError};
pub use core::stt::{
    AudioSource, SttError, SttResult, Transcriber, TranscriptFormat, TranscriptionOptions,
    create_transcriber,
};
pub use core::text::segment;
pub use core::tts::{
    AudioStream, ChunkMode, Sink, StreamingTtsCallback, SynthesisOutput, TtsEngine, TtsError,
    TtsRequest, TtsResult,
};
pub use errors::app_error::{AppError, AppResult};
pub use state::AppState;
