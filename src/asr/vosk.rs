//! ASR (Automatic Speech Recognition) module using Vosk

use super::{chess_grammar, AsrEngine, AsrResult, MIN_CONFIDENCE, SAMPLE_RATE};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};
use vosk::{Model, Recognizer};

/// Vosk-based ASR engine limited to chess vocabulary
pub struct VoskAsr {
    recognizer: Recognizer,
}

impl VoskAsr {
    /// Load the model and build a grammar-restricted recognizer
    pub fn new(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(anyhow::anyhow!(
                "Vosk model not found at {}",
                model_path.display()
            ));
        }

        info!("Loading Vosk model from: {}", model_path.display());

        let model_str = model_path.to_str().ok_or_else(|| {
            anyhow::anyhow!(
                "Vosk model path is not valid UTF-8: {}",
                model_path.display()
            )
        })?;

        let model = Model::new(model_str).context("Failed to load Vosk model")?;

        let grammar = chess_grammar();
        info!("⚙️ Using chess grammar ({} words)", grammar.len());
        let recognizer = Recognizer::new_with_grammar(&model, SAMPLE_RATE as f32, &grammar)
            .context("Failed to create Vosk recognizer with grammar")?;

        Ok(Self { recognizer })
    }

    fn to_result(text: &str, confidences: &[f32]) -> Option<AsrResult> {
        let text = extract_text(text)?;
        if text == "[unk]" {
            return None;
        }

        let confidence = if confidences.is_empty() {
            1.0f32 // Default if no word-level info
        } else {
            confidences.iter().sum::<f32>() / confidences.len() as f32
        };

        if confidence < MIN_CONFIDENCE {
            info!(
                "🔇 Rejecting low-confidence ASR ({:.2}): '{}'",
                confidence, text
            );
            return None;
        }

        Some(AsrResult { text, confidence })
    }
}

impl AsrEngine for VoskAsr {
    fn process(&mut self, samples: &[i16]) -> Result<Option<AsrResult>> {
        match self.recognizer.accept_waveform(samples) {
            vosk::DecodingState::Finalized => {
                let result = self.recognizer.final_result();
                if let Some(single) = result.single() {
                    let confidences: Vec<f32> = single.result.iter().map(|w| w.conf).collect();
                    return Ok(Self::to_result(single.text, &confidences));
                }
            }
            vosk::DecodingState::Running => {
                debug!("Partial: {}", self.recognizer.partial_result().partial);
            }
            vosk::DecodingState::Failed => {
                debug!("Decoding failed for this chunk");
            }
        }

        Ok(None)
    }

    fn finish(&mut self) -> Option<AsrResult> {
        let result = self.recognizer.final_result();
        let single = result.single()?;
        let confidences: Vec<f32> = single.result.iter().map(|w| w.conf).collect();
        Self::to_result(single.text, &confidences)
    }

    fn reset(&mut self) {
        self.recognizer.reset();
    }
}

/// Extract text from Vosk result, filtering empty results
fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
