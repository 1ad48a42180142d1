//! Core move normalization
//!
//! Turns typed text and speech transcripts into coordinate moves.

pub mod spoken_move;
pub mod text_normalizer;

pub use spoken_move::{parse_spoken, SpokenIntent};
pub use text_normalizer::{normalize_move_text, parse_coordinate, parse_move};
