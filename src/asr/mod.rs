//! ASR (Automatic Speech Recognition) Module
//!
//! A listen attempt is bounded: audio chunks are fed to an [`AsrEngine`]
//! until it finalizes an utterance or the timeout runs out.
//!
//! Backends:
//! - Vosk: local offline recognition restricted to chess vocabulary
//!   (`voice` feature)

#[cfg(feature = "voice")]
pub mod listener;
#[cfg(feature = "voice")]
pub mod vosk;

use crate::core::spoken_move::{
    CONNECTORS, HELP_WORDS, PROMOTION_WORDS, QUIT_WORDS, RANK_MISHEARINGS, RANK_WORDS,
};
use anyhow::Result;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[cfg(feature = "voice")]
pub use listener::VoiceListener;
#[cfg(feature = "voice")]
pub use vosk::VoskAsr;

/// Capture rate expected by the recognizer (mono i16)
pub const SAMPLE_RATE: u32 = 16000;

/// Result from ASR with confidence score
#[derive(Debug, Clone)]
pub struct AsrResult {
    pub text: String,
    pub confidence: f32,
}

/// Minimum confidence threshold (below this, results are discarded)
pub const MIN_CONFIDENCE: f32 = 0.5;

/// Trait for ASR engines
pub trait AsrEngine {
    /// Process audio samples and return recognized text (if final).
    /// Results below MIN_CONFIDENCE should be filtered out internally
    fn process(&mut self, samples: &[i16]) -> Result<Option<AsrResult>>;

    /// Flush whatever has been heard so far (used when a listen times out)
    fn finish(&mut self) -> Option<AsrResult>;

    /// Reset the recognizer state
    fn reset(&mut self);
}

/// Move-side view of speech: one bounded listen, one transcript
pub trait SpeechSource {
    /// `None` on silence, timeout or capture failure
    fn listen(&mut self) -> Option<String>;
}

/// Feed chunks into `engine` until it produces text or `timeout` elapses
pub fn capture_transcript(
    chunks: &Receiver<Vec<i16>>,
    engine: &mut dyn AsrEngine,
    timeout: Duration,
) -> Option<String> {
    let deadline = Instant::now() + timeout;
    engine.reset();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            debug!("⏱️ Listen timed out, flushing recognizer");
            break;
        }

        match chunks.recv_timeout(remaining) {
            Ok(samples) => match engine.process(&samples) {
                Ok(Some(result)) => {
                    info!(
                        "📝 Heard: '{}' (confidence {:.2})",
                        result.text, result.confidence
                    );
                    return non_empty(result.text);
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("ASR chunk failed: {}", e);
                }
            },
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Audio stream ended during listen");
                break;
            }
        }
    }

    engine.finish().and_then(|result| non_empty(result.text))
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Every word the recognizer is allowed to emit
pub fn chess_grammar() -> Vec<String> {
    let mut words: Vec<String> = ('a'..='h').map(|c| c.to_string()).collect();
    words.extend(RANK_WORDS.iter().map(|(w, _)| w.to_string()));
    words.extend(RANK_MISHEARINGS.iter().map(|(w, _)| w.to_string()));
    words.extend(CONNECTORS.iter().map(|w| w.to_string()));
    words.extend(PROMOTION_WORDS.iter().map(|(w, _)| w.to_string()));
    words.extend(QUIT_WORDS.iter().map(|w| w.to_string()));
    words.extend(HELP_WORDS.iter().map(|w| w.to_string()));
    words.push("[unk]".to_string());

    // Digits are spelled out by the model; keep single letters once
    words.retain(|w| !w.chars().all(|c| c.is_ascii_digit()));
    let mut seen = std::collections::HashSet::new();
    words.retain(|w| seen.insert(w.clone()));
    words
}
