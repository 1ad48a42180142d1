//! Voice Chess - play a random bot by keyboard or voice
//!
//! The board window (iced) owns the main thread; the game runs beside it.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::Color;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use voice_chess::asr::SpeechSource;
use voice_chess::config::Config;
use voice_chess::game::Game;
use voice_chess::input::{self, LineSource, SideChoice};
use voice_chess::session::{GameEnd, Session};
use voice_chess::viewer::{self, BoardView, HeadlessView, ViewerSettings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Play as white, black or random (w|b|r); prompts when omitted
    #[arg(long, value_parser = parse_side)]
    side: Option<SideChoice>,

    /// Terminal only, no board window
    #[arg(long)]
    no_board: bool,

    /// Directory holding the piece artwork
    #[arg(long)]
    figures: Option<PathBuf>,

    /// Square size in pixels
    #[arg(long)]
    tile: Option<u32>,

    /// Vosk model directory
    #[arg(long)]
    model: Option<String>,

    /// Audio input device index
    #[arg(short, long)]
    device: Option<usize>,

    /// Seconds to listen for a spoken move
    #[arg(long)]
    timeout: Option<u64>,

    /// Seed the bot (and random side) for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// List audio input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_side(text: &str) -> Result<SideChoice, String> {
    SideChoice::parse(text).ok_or_else(|| format!("expected w, b or r, got '{}'", text))
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if self.no_board {
            config.show_board = false;
        }
        if let Some(dir) = &self.figures {
            config.figures_dir = dir.clone();
        }
        if let Some(tile) = self.tile {
            config.tile = tile;
        }
        if let Some(model) = &self.model {
            config.vosk_model_path = model.clone();
        }
        if self.device.is_some() {
            config.audio_device = self.device;
        }
        if let Some(secs) = self.timeout {
            config.listen_timeout_secs = secs;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load().context("Failed to load config")?;
    args.apply(&mut config);

    let default_level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("♟️ Voice Chess v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.list_devices {
        return list_devices();
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (tx, mut lines) = input::input_channel();
    input::spawn_interrupt_watcher(tx.clone())?;
    input::spawn_stdin_reader(tx)?;

    let mut stdout = std::io::stdout();
    let human = match args.side {
        Some(choice) => choice.resolve(&mut rng),
        None => match input::choose_side(&mut lines, &mut stdout, &mut rng)? {
            Some(color) => color,
            None => {
                writeln!(stdout, "\nInterrupted. Goodbye!")?;
                return Ok(());
            }
        },
    };
    info!("🎯 Human plays {}", if human == Color::White { "white" } else { "black" });

    let end = if config.show_board {
        let (handle, updates, closed) = viewer::window_channel();
        let settings = ViewerSettings {
            figures_dir: config.figures_dir.clone(),
            tile: config.tile,
        };

        let game_config = config.clone();
        let game_thread = thread::Builder::new()
            .name("game".to_string())
            .spawn(move || play(&game_config, human, lines, handle, rng))
            .context("Failed to spawn game thread")?;

        if let Err(e) = viewer::run_window(updates, settings) {
            warn!("🪟 Board window unavailable, continuing text-only: {}", e);
        }
        closed.store(true, Ordering::SeqCst);

        game_thread
            .join()
            .map_err(|_| anyhow::anyhow!("game thread panicked"))??
    } else {
        play(&config, human, lines, HeadlessView, rng)?
    };

    info!("👋 Session ended: {:?}", end);
    Ok(())
}

/// Runs on whichever thread does not own the window. Speech is set up
/// here so the recognizer never crosses threads.
fn play<L, V>(
    config: &Config,
    human: Color,
    mut lines: L,
    mut view: V,
    mut rng: StdRng,
) -> Result<GameEnd>
where
    L: LineSource,
    V: BoardView,
{
    let mut speech = build_speech(config);
    let mut stdout = std::io::stdout();
    let mut session = Session::new(
        Game::new(),
        human,
        &mut lines,
        &mut view,
        &mut stdout,
        &mut rng,
    );
    if let Some(speech) = speech.as_deref_mut() {
        session = session.with_speech(speech);
    }
    Ok(session.run()?)
}

#[cfg(feature = "voice")]
fn list_devices() -> Result<()> {
    voice_chess::audio::list_input_devices()
}

#[cfg(not(feature = "voice"))]
fn list_devices() -> Result<()> {
    warn!("🎙️ Built without the `voice` feature; no audio capture available");
    Ok(())
}

#[cfg(feature = "voice")]
fn build_speech(config: &Config) -> Option<Box<dyn SpeechSource>> {
    match voice_chess::asr::VoiceListener::new(config) {
        Ok(listener) => {
            info!("🎤 Voice input ready");
            Some(Box::new(listener))
        }
        Err(e) => {
            warn!("🎤 Voice input disabled: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "voice"))]
fn build_speech(_config: &Config) -> Option<Box<dyn SpeechSource>> {
    info!("🎤 Built without the `voice` feature; moves are typed");
    None
}
