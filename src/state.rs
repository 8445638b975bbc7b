//! Shared application state for the HTTP server.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::tts::{TtsEngine, TtsResult};

/// State shared across request handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub tts: Arc<TtsEngine>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> TtsResult<Self> {
        let tts = Arc::new(TtsEngine::new(config.credentials.clone())?);
        Ok(Self { config, tts })
    }
}
