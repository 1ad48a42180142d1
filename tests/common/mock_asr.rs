//! Mock ASR Engine for Testing
//!
//! Provides controlled responses for integration tests.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use voice_chess::asr::{AsrEngine, AsrResult};

/// Mock ASR engine that returns predetermined responses
pub struct MockAsr {
    /// Queue of responses to return
    pub responses: Vec<AsrResult>,
    /// Current index in responses
    idx: usize,
    /// Chunks to swallow before answering
    warmup: usize,
    /// What `finish` hands back when the listen times out
    pub pending: Option<AsrResult>,
    /// Record all audio chunks received (for verification)
    pub received_chunks: Arc<Mutex<Vec<Vec<i16>>>>,
    pub resets: usize,
}

impl MockAsr {
    pub fn new(responses: Vec<AsrResult>) -> Self {
        Self {
            responses,
            idx: 0,
            warmup: 0,
            pending: None,
            received_chunks: Arc::new(Mutex::new(Vec::new())),
            resets: 0,
        }
    }

    /// Create a mock that returns a single phrase
    pub fn with_phrase(text: &str, confidence: f32) -> Self {
        Self::new(vec![AsrResult {
            text: text.to_string(),
            confidence,
        }])
    }

    /// Only answer after `chunks` chunks have been heard
    pub fn after_chunks(mut self, chunks: usize) -> Self {
        self.warmup = chunks;
        self
    }

    /// Never finalize; only `finish` yields text
    pub fn pending_only(text: &str) -> Self {
        let mut mock = Self::new(Vec::new());
        mock.pending = Some(AsrResult {
            text: text.to_string(),
            confidence: 1.0,
        });
        mock
    }
}

impl AsrEngine for MockAsr {
    fn process(&mut self, samples: &[i16]) -> Result<Option<AsrResult>> {
        // Record received audio
        let heard = match self.received_chunks.lock() {
            Ok(mut chunks) => {
                chunks.push(samples.to_vec());
                chunks.len()
            }
            Err(_) => 0,
        };

        if heard <= self.warmup {
            return Ok(None);
        }

        // Return next response if available
        if self.idx < self.responses.len() {
            let result = self.responses[self.idx].clone();
            self.idx += 1;
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }

    fn finish(&mut self) -> Option<AsrResult> {
        self.pending.take()
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_asr_returns_responses() {
        let mut mock = MockAsr::with_phrase("e two to e four", 0.95);
        let result = mock.process(&[0i16; 100]).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().text, "e two to e four");
    }

    #[test]
    fn test_mock_asr_warmup_returns_nothing() {
        let mut mock = MockAsr::with_phrase("quit", 0.9).after_chunks(2);
        assert!(mock.process(&[0i16; 100]).unwrap().is_none());
        assert!(mock.process(&[0i16; 100]).unwrap().is_none());
        assert!(mock.process(&[0i16; 100]).unwrap().is_some());
    }
}
