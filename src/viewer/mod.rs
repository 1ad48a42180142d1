//! Board viewer
//!
//! The game loop talks to the display through [`BoardView`]. The windowed
//! implementation is a handle onto an iced application running on the main
//! thread; the two sides share only a bounded update channel and a `closed`
//! flag, so the game never blocks on the window.

pub mod pieces;
pub mod text;
pub mod window;

use shakmaty::{Board, Color, Square};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use tracing::{debug, info};

pub use pieces::PieceArt;
pub use text::board_diagram;
pub use window::{run_window, ViewerSettings};

const UPDATE_BUFFER: usize = 16;

/// What the window needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub board: Board,
    pub turn: Color,
    pub last_move: Option<(Square, Square)>,
}

/// Messages from the game to the window
#[derive(Debug, Clone)]
pub enum ViewerUpdate {
    Position(BoardSnapshot),
    Shutdown,
}

/// Display side of the game loop
pub trait BoardView {
    /// Drain window events without blocking; notices a closed window
    fn pump(&mut self);

    /// Show a position, highlighting the last move's squares
    fn render(&mut self, snapshot: BoardSnapshot);

    /// Tear the window down
    fn close(&mut self);

    /// Whether frames still go anywhere
    fn is_active(&self) -> bool;
}

/// No window at all (`--no-board`, tests)
#[derive(Debug, Default)]
pub struct HeadlessView;

impl BoardView for HeadlessView {
    fn pump(&mut self) {}

    fn render(&mut self, _snapshot: BoardSnapshot) {}

    fn close(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}

/// Game-side handle onto the iced board window
#[derive(Debug)]
pub struct WindowHandle {
    updates: Option<SyncSender<ViewerUpdate>>,
    /// Newest frame that did not fit in the channel
    pending: Option<BoardSnapshot>,
    closed: Arc<AtomicBool>,
}

/// Wire a handle to the receiving end the window will own.
/// The returned flag is raised once the window is gone.
pub fn window_channel() -> (WindowHandle, Receiver<ViewerUpdate>, Arc<AtomicBool>) {
    let (tx, rx) = mpsc::sync_channel(UPDATE_BUFFER);
    let closed = Arc::new(AtomicBool::new(false));
    let handle = WindowHandle {
        updates: Some(tx),
        pending: None,
        closed: closed.clone(),
    };
    (handle, rx, closed)
}

impl WindowHandle {
    fn send(&mut self, update: ViewerUpdate) {
        let Some(tx) = &self.updates else {
            return;
        };
        match tx.try_send(update) {
            Ok(()) => {}
            Err(TrySendError::Full(ViewerUpdate::Position(snapshot))) => {
                debug!("Board window busy, holding the latest frame");
                self.pending = Some(snapshot);
            }
            Err(TrySendError::Full(ViewerUpdate::Shutdown)) => {
                // Dropping the sender below also ends the window
                debug!("Board window busy, shutdown left to disconnect");
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("Board window receiver gone");
                self.updates = None;
                self.pending = None;
            }
        }
    }
}

impl BoardView for WindowHandle {
    fn pump(&mut self) {
        if self.updates.is_some() && self.closed.load(Ordering::SeqCst) {
            info!("🪟 Board window closed; continuing in the terminal");
            self.updates = None;
            self.pending = None;
        }
        if let Some(snapshot) = self.pending.take() {
            self.send(ViewerUpdate::Position(snapshot));
        }
    }

    fn render(&mut self, snapshot: BoardSnapshot) {
        // A newer frame supersedes one still waiting for room
        self.pending = None;
        self.send(ViewerUpdate::Position(snapshot));
    }

    fn close(&mut self) {
        self.pending = None;
        self.send(ViewerUpdate::Shutdown);
        self.updates = None;
    }

    fn is_active(&self) -> bool {
        self.updates.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(last_move: Option<(Square, Square)>) -> BoardSnapshot {
        BoardSnapshot {
            board: Board::default(),
            turn: Color::White,
            last_move,
        }
    }

    #[test]
    fn test_render_sends_snapshot() {
        let (mut handle, rx, _closed) = window_channel();
        handle.render(BoardSnapshot {
            board: Board::default(),
            turn: Color::Black,
            last_move: Some((Square::E2, Square::E4)),
        });

        match rx.try_recv().expect("snapshot sent") {
            ViewerUpdate::Position(snapshot) => {
                assert_eq!(snapshot.board, Board::default());
                assert_eq!(snapshot.turn, Color::Black);
                assert_eq!(snapshot.last_move, Some((Square::E2, Square::E4)));
            }
            other => panic!("unexpected update {:?}", other),
        }
    }

    #[test]
    fn test_full_channel_keeps_newest_frame() {
        let (mut handle, rx, _closed) = window_channel();
        for _ in 0..UPDATE_BUFFER {
            handle.render(snapshot(None));
        }
        handle.render(snapshot(Some((Square::G1, Square::F3))));
        handle.render(snapshot(Some((Square::E2, Square::E4))));

        // Window catches up by one frame, then the game loop pumps
        assert!(rx.try_recv().is_ok());
        handle.pump();

        match rx.try_iter().last().expect("frames queued") {
            ViewerUpdate::Position(snapshot) => {
                assert_eq!(snapshot.last_move, Some((Square::E2, Square::E4)));
            }
            other => panic!("unexpected update {:?}", other),
        }
    }

    #[test]
    fn test_closed_window_disables_handle() {
        let (mut handle, rx, closed) = window_channel();
        assert!(handle.is_active());

        closed.store(true, Ordering::SeqCst);
        handle.pump();
        assert!(!handle.is_active());

        handle.render(snapshot(None));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_disables_handle() {
        let (mut handle, rx, _closed) = window_channel();
        drop(rx);
        handle.render(snapshot(None));
        assert!(!handle.is_active());
    }

    #[test]
    fn test_close_sends_shutdown() {
        let (mut handle, rx, _closed) = window_channel();
        handle.close();
        assert!(matches!(rx.try_recv(), Ok(ViewerUpdate::Shutdown)));
        assert!(!handle.is_active());
    }
}
