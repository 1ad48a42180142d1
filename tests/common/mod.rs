#![allow(dead_code)]

pub mod mock_asr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color};
use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use voice_chess::asr::SpeechSource;
use voice_chess::game::Game;
use voice_chess::input::ScriptedLines;
use voice_chess::session::{GameEnd, Session};
use voice_chess::viewer::{BoardSnapshot, BoardView};

/// Transcripts handed out one per listen
#[derive(Default)]
pub struct ScriptedSpeech {
    pub transcripts: VecDeque<Option<String>>,
    pub listens: usize,
}

impl ScriptedSpeech {
    pub fn new(transcripts: &[Option<&str>]) -> Self {
        Self {
            transcripts: transcripts.iter().map(|t| t.map(str::to_string)).collect(),
            listens: 0,
        }
    }
}

impl SpeechSource for ScriptedSpeech {
    fn listen(&mut self) -> Option<String> {
        self.listens += 1;
        self.transcripts.pop_front().flatten()
    }
}

/// Board view that remembers what it was asked to show
#[derive(Default)]
pub struct RecordingView {
    pub frames: Vec<BoardSnapshot>,
    pub pumps: usize,
    pub closed: bool,
}

impl BoardView for RecordingView {
    fn pump(&mut self) {
        self.pumps += 1;
    }

    fn render(&mut self, snapshot: BoardSnapshot) {
        self.frames.push(snapshot);
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_active(&self) -> bool {
        !self.closed
    }
}

/// Everything a finished session left behind
pub struct Outcome {
    pub end: GameEnd,
    pub output: String,
    pub game: Game,
    pub view: RecordingView,
}

pub fn game_from_fen(fen: &str) -> Game {
    let fen: Fen = fen.parse().expect("valid fen");
    let pos: Chess = fen
        .into_position(CastlingMode::Standard)
        .expect("legal position");
    Game::from_position(pos)
}

/// Run a session against scripted keyboard (and optionally speech) input
pub fn play_scripted(
    game: Game,
    human: Color,
    lines: ScriptedLines,
    speech: Option<&mut ScriptedSpeech>,
    seed: u64,
) -> Outcome {
    let mut lines = lines;
    let mut view = RecordingView::default();
    let mut out = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let (end, game) = {
        let mut session = Session::new(game, human, &mut lines, &mut view, &mut out, &mut rng);
        if let Some(speech) = speech {
            session = session.with_speech(speech);
        }
        let end = session.run().expect("session runs");
        (end, session.game().clone())
    };

    Outcome {
        end,
        output: String::from_utf8(out).expect("utf8 output"),
        game,
        view,
    }
}

/// The binary, run in an isolated config home with the given stdin
pub struct CliRun {
    pub temp_dir: TempDir,
    pub output: Output,
}

impl CliRun {
    pub fn new(args: &[&str], stdin: &str) -> Self {
        Self::with_config(args, stdin, None)
    }

    pub fn with_config(args: &[&str], stdin: &str, config: Option<&str>) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_home = temp_dir.path().join("config");
        fs::create_dir_all(config_home.join("voice-chess")).expect("Failed to create config dir");
        if let Some(json) = config {
            fs::write(config_home.join("voice-chess/config.json"), json)
                .expect("Failed to write config");
        }

        let mut child = Command::new(env!("CARGO_BIN_EXE_voice-chess"))
            .args(args)
            .env("XDG_CONFIG_HOME", &config_home)
            .env("XDG_DATA_HOME", temp_dir.path().join("data"))
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn voice-chess");

        child
            .stdin
            .take()
            .expect("piped stdin")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");

        let output = child.wait_with_output().expect("Failed to wait for voice-chess");
        Self { temp_dir, output }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn config_file(&self) -> PathBuf {
        self.temp_dir.path().join("config/voice-chess/config.json")
    }
}
