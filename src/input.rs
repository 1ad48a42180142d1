//! Keyboard input
//!
//! A dedicated thread blocks on stdin and forwards whole lines over a
//! bounded channel. The game loop polls that channel with a short timeout so
//! it can keep servicing the board window between keystrokes. Ctrl-C is
//! delivered through the same channel.

use crate::error::{ChessError, ChessResult};
use rand::Rng;
use shakmaty::Color;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a single poll waits for a line
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

const LINE_BUFFER: usize = 8;

/// Something that arrived on the input side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line, without the trailing newline
    Line(String),
    /// stdin closed
    Eof,
    /// Ctrl-C
    Interrupted,
}

/// Non-blocking (short timeout) source of input lines
pub trait LineSource {
    /// `None` when nothing arrived within `timeout`
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent>;

    /// Block until the next event
    fn wait(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.poll(Duration::from_secs(3600)) {
                return event;
            }
        }
    }
}

impl LineSource for Receiver<InputEvent> {
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        match self.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(InputEvent::Eof),
        }
    }
}

/// Pre-recorded input, for tests and scripted runs
#[derive(Debug, Default)]
pub struct ScriptedLines {
    events: VecDeque<InputEvent>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: lines
                .into_iter()
                .map(|l| InputEvent::Line(l.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl LineSource for ScriptedLines {
    fn poll(&mut self, _timeout: Duration) -> Option<InputEvent> {
        Some(self.events.pop_front().unwrap_or(InputEvent::Eof))
    }
}

/// Create the bounded channel that feeds the game loop
pub fn input_channel() -> (SyncSender<InputEvent>, Receiver<InputEvent>) {
    mpsc::sync_channel(LINE_BUFFER)
}

/// Spawn the stdin reader thread
pub fn spawn_stdin_reader(tx: SyncSender<InputEvent>) -> ChessResult<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            loop {
                let mut line = String::new();
                let event = match handle.read_line(&mut line) {
                    Ok(0) => InputEvent::Eof,
                    Ok(_) => InputEvent::Line(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
                    Err(e) => {
                        warn!("⚠️ stdin read failed: {}", e);
                        InputEvent::Eof
                    }
                };
                let done = event == InputEvent::Eof;
                if tx.send(event).is_err() || done {
                    debug!("stdin reader stopping");
                    return;
                }
            }
        })
        .map_err(|e| ChessError::Input(format!("cannot spawn stdin reader: {}", e)))?;
    Ok(())
}

/// Spawn a watcher that turns Ctrl-C into [`InputEvent::Interrupted`]
pub fn spawn_interrupt_watcher(tx: SyncSender<InputEvent>) -> ChessResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("interrupt-watcher".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        debug!("Ctrl-C received");
                        let _ = tx.send(InputEvent::Interrupted);
                    }
                    Err(e) => warn!("⚠️ Cannot listen for Ctrl-C: {}", e),
                }
            });
        })
        .map_err(|e| ChessError::Input(format!("cannot spawn interrupt watcher: {}", e)))?;
    Ok(())
}

/// Side selection as typed at the start prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideChoice {
    White,
    Black,
    Random,
}

impl SideChoice {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "w" | "white" => Some(SideChoice::White),
            "b" | "black" => Some(SideChoice::Black),
            "r" | "random" => Some(SideChoice::Random),
            _ => None,
        }
    }

    /// Settle on a colour, rolling the dice for `Random`
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Color {
        match self {
            SideChoice::White => Color::White,
            SideChoice::Black => Color::Black,
            SideChoice::Random => {
                if rng.gen_bool(0.5) {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

/// Prompt until the user picks a side. `None` on Eof/Ctrl-C.
pub fn choose_side<L, W, R>(input: &mut L, out: &mut W, rng: &mut R) -> ChessResult<Option<Color>>
where
    L: LineSource + ?Sized,
    W: Write,
    R: Rng + ?Sized,
{
    loop {
        write!(out, "Choose side: [w]hite / [b]lack / [r]andom: ")?;
        out.flush()?;

        let line = match input.wait() {
            InputEvent::Line(line) => line,
            InputEvent::Eof | InputEvent::Interrupted => return Ok(None),
        };

        match SideChoice::parse(&line) {
            Some(choice) => {
                let color = choice.resolve(rng);
                if choice == SideChoice::Random {
                    let letter = if color == Color::White { "W" } else { "B" };
                    writeln!(out, "Random chose: {}", letter)?;
                }
                return Ok(Some(color));
            }
            None => writeln!(out, "Please enter w, b, or r.")?,
        }
    }
}
