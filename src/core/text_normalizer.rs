//! Typed Move Normalization
//!
//! Turns loosely formatted keyboard input (`e2 to e4`, `e2-e4`, `E2 E4`)
//! into a coordinate move before asking the rules engine about it.

use crate::notation::CoordinateMove;
use lazy_static::lazy_static;
use regex::Regex;
use shakmaty::{Chess, Move};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("static regex");
}

/// Normalize typed move text to its compact form
///
/// Connectors are replaced in order (` to `, `->`, `-`) and every
/// whitespace run is removed afterwards.
pub fn normalize_move_text(text: &str) -> String {
    let mut result = text.trim().to_lowercase();

    for (from, to) in [(" to ", " "), ("->", " "), ("-", " ")] {
        result = result.replace(from, to);
    }

    WHITESPACE.replace_all(&result, "").into_owned()
}

/// Normalize and read as a coordinate move, without a legality check
pub fn parse_coordinate(text: &str) -> Option<CoordinateMove> {
    normalize_move_text(text).parse().ok()
}

/// Parse typed text into a move that is legal in `pos`
pub fn parse_move(pos: &Chess, text: &str) -> Option<Move> {
    parse_coordinate(text)?.to_legal(pos)
}
