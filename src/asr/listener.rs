//! Microphone + Vosk speech source

use super::{capture_transcript, SpeechSource, VoskAsr};
use crate::audio::Microphone;
use crate::config::Config;
use crate::error::{ChessError, ChessResult};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Opens the microphone for each listen and runs it through Vosk
pub struct VoiceListener {
    asr: VoskAsr,
    device: Option<usize>,
    timeout: Duration,
    mic_warned: bool,
}

impl VoiceListener {
    pub fn new(config: &Config) -> ChessResult<Self> {
        let asr = VoskAsr::new(Path::new(&config.vosk_model_path))
            .map_err(|e| ChessError::Asr(format!("{:#}", e)))?;
        Ok(Self {
            asr,
            device: config.audio_device,
            timeout: config.listen_timeout(),
            mic_warned: false,
        })
    }
}

impl SpeechSource for VoiceListener {
    fn listen(&mut self) -> Option<String> {
        let (_mic, chunks) = match Microphone::open(self.device) {
            Ok(opened) => opened,
            Err(e) => {
                if !self.mic_warned {
                    warn!("🎙️ {}", ChessError::Audio(format!("{:#}", e)));
                    self.mic_warned = true;
                }
                return None;
            }
        };

        info!("🎙️ Listening for up to {}s", self.timeout.as_secs());
        capture_transcript(&chunks, &mut self.asr, self.timeout)
    }
}
