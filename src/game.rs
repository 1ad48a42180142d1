//! Game state
//!
//! Wraps the rules engine position with the bits it does not track on its
//! own: move history and a repetition table for threefold detection.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Square};
use std::collections::HashMap;
use std::fmt;

/// Halfmove clock value at which the fifty-move rule ends the game
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoves,
    ThreefoldRepetition,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate { winner } => {
                let name = match winner {
                    Color::White => "White",
                    Color::Black => "Black",
                };
                write!(f, "Checkmate! {} wins.", name)
            }
            Termination::Stalemate => write!(f, "Draw by stalemate."),
            Termination::InsufficientMaterial => write!(f, "Draw by insufficient material."),
            Termination::FiftyMoves => write!(f, "Draw by fifty-move rule."),
            Termination::ThreefoldRepetition => write!(f, "Draw by threefold repetition."),
        }
    }
}

/// A move that has been applied, in both notations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub uci: String,
    pub san: String,
    pub from: Option<Square>,
    pub to: Square,
}

/// Position plus history
#[derive(Debug, Clone)]
pub struct Game {
    position: Chess,
    history: Vec<PlayedMove>,
    repetitions: HashMap<String, u32>,
}

impl Default for Game {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary position (the position counts once for
    /// repetition purposes)
    pub fn from_position(position: Chess) -> Self {
        let mut repetitions = HashMap::new();
        repetitions.insert(repetition_key(&position), 1);
        Self {
            position,
            history: Vec::new(),
            repetitions,
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last()
    }

    /// Squares to highlight for the most recent move
    pub fn last_move_squares(&self) -> Option<(Square, Square)> {
        self.last_move()
            .and_then(|played| played.from.map(|from| (from, played.to)))
    }

    /// Apply a move the rules engine already produced for this position
    pub fn play(&mut self, mv: &Move) -> PlayedMove {
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        // SAN carries the check/mate suffix, so it is taken while playing
        let san =
            SanPlus::from_move_and_play_unchecked(&mut self.position, mv.clone()).to_string();
        let played = PlayedMove {
            uci,
            san,
            from: mv.from(),
            to: mv.to(),
        };

        *self
            .repetitions
            .entry(repetition_key(&self.position))
            .or_insert(0) += 1;
        self.history.push(played.clone());
        played
    }

    /// Ask the rules engine whether the game is over
    pub fn termination(&self) -> Option<Termination> {
        let pos = &self.position;
        if pos.is_checkmate() {
            return Some(Termination::Checkmate {
                winner: !pos.turn(),
            });
        }
        if pos.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if pos.is_stalemate() {
            return Some(Termination::Stalemate);
        }
        if pos.halfmoves() >= FIFTY_MOVE_PLIES {
            return Some(Termination::FiftyMoves);
        }
        if self.repetition_count() >= 3 {
            return Some(Termination::ThreefoldRepetition);
        }
        None
    }

    /// How many times the current position has occurred
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&repetition_key(&self.position))
            .copied()
            .unwrap_or(0)
    }
}

/// FEN without the move counters: placement, side to move, castling rights
/// and a capturable en passant square
fn repetition_key(pos: &Chess) -> String {
    let fen = Fen::from_position(pos, EnPassantMode::Legal).to_string();
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
