//! Incremental text buffering for near-real-time narration.
//!
//! [`StreamingTtsCallback`] consumes arbitrarily-sized text fragments from
//! an upstream producer (typically a token-streaming language model),
//! accumulates them in one owned buffer, and speaks each sentence as soon
//! as its boundary arrives. A single instance serves a single producer;
//! it holds no locking and must not be shared across concurrent pushers.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::base::{ChunkMode, Sink, TtsResult};
use super::dispatch::{TtsEngine, TtsRequest};
use crate::core::audio::AudioOutput;
use crate::core::text::segment;

/// Candidates shorter than this (after trimming) are silently discarded
/// rather than spoken. Callers that need every fragment spoken should set
/// a lower minimum.
pub const DEFAULT_MIN_SENTENCE_LENGTH: usize = 10;

/// Sentence endings: `.` `!` `?` followed by whitespace or end of buffer.
static SENTENCE_ENDINGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](?:\s+|$)").expect("sentence ending regex is valid"));

/// Receives complete sentences extracted from the buffer.
///
/// The production implementation routes through the unified dispatcher;
/// tests substitute their own to observe dispatch behavior directly.
#[async_trait]
pub trait SentenceDispatcher: Send + Sync {
    async fn speak(&self, chunks: &[String]) -> TtsResult<()>;
}

/// Buffers streaming text and converts completed sentences to speech.
pub struct StreamingTtsCallback {
    dispatcher: Arc<dyn SentenceDispatcher>,
    min_sentence_length: usize,
    buffer: String,
}

impl StreamingTtsCallback {
    pub fn new(dispatcher: Arc<dyn SentenceDispatcher>) -> Self {
        Self {
            dispatcher,
            min_sentence_length: DEFAULT_MIN_SENTENCE_LENGTH,
            buffer: String::new(),
        }
    }

    /// Override the minimum sentence length.
    pub fn with_min_sentence_length(mut self, min_sentence_length: usize) -> Self {
        self.min_sentence_length = min_sentence_length;
        self
    }

    /// Text currently buffered (always the tail after the last dispatched
    /// boundary).
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Process one streaming text fragment.
    ///
    /// Appends to the buffer, then speaks every completed sentence of at
    /// least the configured minimum length. A dispatch error for one
    /// sentence is logged and does not stop later sentences.
    pub async fn push(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.buffer.push_str(fragment);

        for sentence in self.extract_complete_sentences() {
            self.speak_sentence(&sentence).await;
        }
    }

    /// Extract complete sentences, removing them from the buffer.
    ///
    /// Everything through the last boundary leaves the buffer, so after
    /// this the buffer never contains an already-dispatched sentence.
    fn extract_complete_sentences(&mut self) -> Vec<String> {
        let last_end = match SENTENCE_ENDINGS.find_iter(&self.buffer).last() {
            Some(found) => found.end(),
            None => return Vec::new(),
        };

        let ready: String = self.buffer.drain(..last_end).collect();

        SENTENCE_ENDINGS
            .split(&ready)
            .map(str::trim)
            .filter(|sentence| {
                !sentence.is_empty() && sentence.chars().count() >= self.min_sentence_length
            })
            .map(str::to_string)
            .collect()
    }

    /// Speak whatever remains in the buffer, regardless of length.
    ///
    /// The buffer is cleared before dispatch, so it ends up empty on every
    /// exit path, including dispatch failure. Errors are logged and
    /// swallowed to keep `flush` safe to call unconditionally at stream
    /// end.
    pub async fn flush(&mut self) {
        let remainder = std::mem::take(&mut self.buffer);
        let remainder = remainder.trim();
        if remainder.is_empty() {
            return;
        }
        self.speak_sentence(remainder).await;
    }

    async fn speak_sentence(&self, sentence: &str) {
        let chunks = segment(sentence);
        if chunks.is_empty() {
            return;
        }
        if let Err(error) = self.dispatcher.speak(&chunks).await {
            warn!("TTS streaming error: {error}");
        }
    }
}

/// Production dispatcher: per-chunk streaming synthesis played on a local
/// audio output, with fixed request parameters.
pub struct EngineDispatcher {
    engine: Arc<TtsEngine>,
    request: TtsRequest,
    sink: Sink,
}

impl EngineDispatcher {
    pub fn new(engine: Arc<TtsEngine>, request: TtsRequest, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            engine,
            request,
            sink: Sink::Play(output),
        }
    }
}

#[async_trait]
impl SentenceDispatcher for EngineDispatcher {
    async fn speak(&self, chunks: &[String]) -> TtsResult<()> {
        self.engine
            .dispatch(chunks, &self.request, ChunkMode::PerChunk, &self.sink)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::core::tts::base::TtsError;

    /// Records dispatched sentences; optionally fails every call.
    #[derive(Default)]
    struct RecordingDispatcher {
        spoken: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl SentenceDispatcher for RecordingDispatcher {
        async fn speak(&self, chunks: &[String]) -> TtsResult<()> {
            self.spoken.lock().unwrap().push(chunks.to_vec());
            if self.fail {
                return Err(TtsError::Validation("forced failure".to_string()));
            }
            Ok(())
        }
    }

    fn callback_with(
        fail: bool,
        min: usize,
    ) -> (StreamingTtsCallback, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher {
            spoken: Mutex::new(Vec::new()),
            fail,
        });
        let callback =
            StreamingTtsCallback::new(dispatcher.clone()).with_min_sentence_length(min);
        (callback, dispatcher)
    }

    #[tokio::test]
    async fn test_empty_fragment_is_a_no_op() {
        let (mut callback, dispatcher) = callback_with(false, 10);
        callback.push("").await;
        assert!(callback.buffered().is_empty());
        assert!(dispatcher.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_sentence_stays_buffered() {
        let (mut callback, dispatcher) = callback_with(false, 10);
        callback.push("this sentence is not done ").await;
        callback.push("yet").await;
        assert_eq!(callback.buffered(), "this sentence is not done yet");
        assert!(dispatcher.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sentence_dispatches_on_boundary() {
        let (mut callback, dispatcher) = callback_with(false, 10);
        callback.push("This is a complete sentence. And a trai").await;
        assert_eq!(callback.buffered(), "And a trai");

        let spoken = dispatcher.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0], vec!["This is a complete sentence".to_string()]);
    }

    #[tokio::test]
    async fn test_minimum_length_threshold() {
        let (mut callback, dispatcher) = callback_with(false, 20);
        callback.push("Short. ").await;
        callback
            .push("This is a longer sentence that will trigger dispatch. ")
            .await;

        let spoken = dispatcher.spoken.lock().unwrap();
        // Only the long sentence was dispatched; the short one is gone for
        // good, not re-buffered.
        assert_eq!(spoken.len(), 1);
        assert_eq!(
            spoken[0],
            vec!["This is a longer sentence that will trigger dispatch".to_string()]
        );
        drop(spoken);
        assert!(callback.buffered().is_empty());
    }

    #[tokio::test]
    async fn test_multiple_sentences_in_one_push() {
        let (mut callback, dispatcher) = callback_with(false, 5);
        callback
            .push("First complete thought. Second complete thought! Third partial")
            .await;

        let spoken = dispatcher.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0], vec!["First complete thought".to_string()]);
        assert_eq!(spoken[1], vec!["Second complete thought".to_string()]);
        drop(spoken);
        assert_eq!(callback.buffered(), "Third partial");
    }

    #[tokio::test]
    async fn test_dispatch_error_does_not_stop_later_sentences() {
        let (mut callback, dispatcher) = callback_with(true, 5);
        callback
            .push("First complete thought. Second complete thought. ")
            .await;

        // Both sentences were attempted even though every dispatch failed.
        assert_eq!(dispatcher.spoken.lock().unwrap().len(), 2);
        assert!(callback.buffered().is_empty());
    }

    #[tokio::test]
    async fn test_flush_speaks_below_minimum_length() {
        let (mut callback, dispatcher) = callback_with(false, 10);
        callback.push("Hi").await;
        assert!(dispatcher.spoken.lock().unwrap().is_empty());

        callback.flush().await;

        let spoken = dispatcher.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0], vec!["Hi".to_string()]);
        drop(spoken);
        assert!(callback.buffered().is_empty());
    }

    #[tokio::test]
    async fn test_flush_clears_buffer_even_when_dispatch_fails() {
        let (mut callback, dispatcher) = callback_with(true, 10);
        callback.push("Hi").await;
        callback.flush().await;

        assert_eq!(dispatcher.spoken.lock().unwrap().len(), 1);
        assert!(callback.buffered().is_empty());
    }

    #[tokio::test]
    async fn test_flush_on_empty_buffer_is_a_no_op() {
        let (mut callback, dispatcher) = callback_with(false, 10);
        callback.flush().await;
        assert!(dispatcher.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_push_after_flush_resumes_accumulating() {
        let (mut callback, dispatcher) = callback_with(false, 5);
        callback.push("Something to say. ").await;
        callback.flush().await;
        callback.push("More arrives afterwards. ").await;

        let spoken = dispatcher.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1], vec!["More arrives afterwards".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatched_sentences_are_segmented() {
        let (mut callback, dispatcher) = callback_with(false, 5);
        // A semicolon is a segmenter boundary but not a sentence ending, so
        // the dispatched sentence splits into two chunks.
        callback
            .push("First clause here; second clause there. ")
            .await;

        let spoken = dispatcher.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(
            spoken[0],
            vec![
                "First clause here;".to_string(),
                "second clause there".to_string()
            ]
        );
    }
}
