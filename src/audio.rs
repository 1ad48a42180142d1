//! Audio capture module using cpal

use crate::asr::SAMPLE_RATE;
use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};

const CHUNK_SIZE: usize = 1024;

/// An open input stream. Capture stops when this is dropped.
pub struct Microphone {
    _stream: cpal::Stream,
}

impl Microphone {
    /// Open the input device and start streaming 16 kHz mono chunks
    pub fn open(device_index: Option<usize>) -> Result<(Self, Receiver<Vec<i16>>)> {
        let host = cpal::default_host();

        let device = if let Some(idx) = device_index {
            host.input_devices()?
                .nth(idx)
                .context("Device index out of range")?
        } else {
            host.default_input_device()
                .context("No default input device")?
        };

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        debug!("Using audio device: {}", device_name);

        let config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Fixed(CHUNK_SIZE as u32),
        };

        let (tx, rx): (Sender<Vec<i16>>, Receiver<Vec<i16>>) = mpsc::channel();

        let stream = device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                // Listener gone: the stream is about to be dropped
                let _ = tx.send(data.to_vec());
            },
            |err| {
                warn!("Audio stream error: {}", err);
            },
            None,
        )?;

        stream.play()?;

        Ok((Self { _stream: stream }, rx))
    }
}

/// Log the available input devices (for picking `--device`)
pub fn list_input_devices() -> Result<()> {
    let host = cpal::default_host();
    info!("Available audio input devices:");
    for (i, device) in host.input_devices()?.enumerate() {
        let name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("  [{}] {}", i, name);
    }
    Ok(())
}
