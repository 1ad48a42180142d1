//! Prompt command handling
//!
//! Classifies a typed line and resolves moves from either input source
//! against the current position.

use crate::core::{parse_coordinate, SpokenIntent};
use crate::notation::CoordinateMove;
use shakmaty::{Chess, Move};
use tracing::debug;

/// Shown at the move prompt
pub const MOVE_PROMPT: &str =
    "Your move ('e2 to e4','e2 e4', 'e7e8q' (q,r,b,n), 'help', 'quit', Enter/'voice' to speak): ";

/// Printed for `help`
pub const HELP_TEXT: &str = "Format examples: 'e2 to e4', 'e2 e4', 'e2e4', 'e7e8q' (q,r,b,n). \
Press Enter or type 'voice' to speak a move, e.g. 'e two to e four' or 'e seven to e eight queen'. \
Type 'quit' to exit.";

/// A line typed at the move prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    /// Capture one spoken move
    Voice,
    /// Anything else: treat as move text
    MoveText(String),
}

/// Classify a typed line
pub fn parse_command(line: &str) -> Command {
    let text = line.trim().to_lowercase();
    match text.as_str() {
        "q" | "quit" | "exit" | "resign" => Command::Quit,
        "h" | "help" => Command::Help,
        "" | "voice" => Command::Voice,
        _ => Command::MoveText(text),
    }
}

/// Where a candidate move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    Typed,
    Spoken,
}

/// Why a candidate was not played
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// Not a coordinate move at all
    Unparsed,
    /// Well formed, but the rules engine refused it
    Illegal(CoordinateMove),
}

/// Single legality gate shared by typed and spoken moves
pub fn resolve(
    pos: &Chess,
    candidate: Option<CoordinateMove>,
    origin: MoveOrigin,
) -> Result<Move, MoveRejection> {
    let coord = candidate.ok_or(MoveRejection::Unparsed)?;
    match coord.to_legal(pos) {
        Some(mv) => Ok(mv),
        None => {
            debug!("🚫 {:?} move {} is illegal here", origin, coord);
            Err(MoveRejection::Illegal(coord))
        }
    }
}

/// Resolve typed move text
pub fn resolve_typed(pos: &Chess, text: &str) -> Result<Move, MoveRejection> {
    resolve(pos, parse_coordinate(text), MoveOrigin::Typed)
}

/// Resolve the move part of a spoken intent
pub fn resolve_spoken(pos: &Chess, intent: &SpokenIntent) -> Result<Move, MoveRejection> {
    let candidate = match intent {
        SpokenIntent::Move(mv) => Some(*mv),
        _ => None,
    };
    resolve(pos, candidate, MoveOrigin::Spoken)
}
