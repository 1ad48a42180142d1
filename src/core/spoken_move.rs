//! Spoken Move Normalization
//!
//! Reads a speech transcript ("e two to e four", "g one to f tree",
//! "e seven e eight queen") as a coordinate move. Vosk output is noisy, so
//! instead of one grammar we try a short list of utterance shapes in a
//! fixed order and take the first that yields two squares.

use crate::notation::{square_from_chars, CoordinateMove};
use lazy_static::lazy_static;
use regex::Regex;
use shakmaty::{Role, Square};
use tracing::debug;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^a-z0-9\s]").expect("static regex");
}

/// Words that end the game
pub const QUIT_WORDS: &[&str] = &["quit", "resign", "exit"];

/// Words that ask for usage help
pub const HELP_WORDS: &[&str] = &["help"];

/// Fillers between the two squares; "two", "too", "2" and "tu" are how
/// the recognizer tends to hear "to"
pub const CONNECTORS: &[&str] = &["to", "two", "too", "2", "tu"];

/// Spelled-out ranks
pub const RANK_WORDS: &[(&str, char)] = &[
    ("one", '1'),
    ("two", '2'),
    ("three", '3'),
    ("four", '4'),
    ("five", '5'),
    ("six", '6'),
    ("seven", '7'),
    ("eight", '8'),
];

/// Recognizer slips that stand for a rank word
pub const RANK_MISHEARINGS: &[(&str, &str)] = &[
    ("tree", "three"),
    ("free", "three"),
    ("for", "four"),
    ("ate", "eight"),
];

/// Spoken promotion pieces and their single-letter forms
pub const PROMOTION_WORDS: &[(&str, Role)] = &[
    ("queen", Role::Queen),
    ("q", Role::Queen),
    ("rook", Role::Rook),
    ("r", Role::Rook),
    ("bishop", Role::Bishop),
    ("b", Role::Bishop),
    ("knight", Role::Knight),
    ("n", Role::Knight),
];

/// What a transcript asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpokenIntent {
    /// "quit", "resign" or "exit" anywhere in the utterance
    Quit,
    /// "help" anywhere in the utterance
    Help,
    /// A well-formed move (not yet checked for legality)
    Move(CoordinateMove),
    /// Nothing we could read
    NoMatch,
}

/// Interpret a raw transcript
pub fn parse_spoken(transcript: &str) -> SpokenIntent {
    let tokens = tokenize(transcript);
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    if words.iter().any(|w| QUIT_WORDS.contains(w)) {
        return SpokenIntent::Quit;
    }
    if words.iter().any(|w| HELP_WORDS.contains(w)) {
        return SpokenIntent::Help;
    }

    let parsed = parse_leading(&words)
        .or_else(|| parse_split_on_to(&words))
        .or_else(|| parse_by_token_count(&words));

    match parsed {
        Some(mv) => {
            debug!("🗣️ '{}' -> {}", transcript, mv);
            SpokenIntent::Move(mv)
        }
        None => {
            debug!("🗣️ No move in '{}'", transcript);
            SpokenIntent::NoMatch
        }
    }
}

/// Lowercase, turn punctuation into spaces, split on whitespace
pub fn tokenize(transcript: &str) -> Vec<String> {
    let lower = transcript.to_lowercase();
    NON_WORD
        .replace_all(&lower, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// `<file> <rank>` at the start, one or more connectors, `<file> <rank>`,
/// then an optional promotion word. Anything after that is ignored.
fn parse_leading(words: &[&str]) -> Option<CoordinateMove> {
    let from = split_square(words.first()?, words.get(1)?)?;

    let mut idx = 2;
    while words.get(idx).is_some_and(|w| CONNECTORS.contains(w)) {
        idx += 1;
    }
    if idx == 2 {
        return None;
    }

    let to = split_square(words.get(idx)?, words.get(idx + 1)?)?;
    let promotion = words.get(idx + 2).and_then(|w| promotion_word(w));

    Some(CoordinateMove::new(from, to, promotion))
}

/// `<square> to <square> [promotion]`, each square compact or split.
/// Requires exactly one "to".
fn parse_split_on_to(words: &[&str]) -> Option<CoordinateMove> {
    let mut sides = words.split(|w| *w == "to");
    let left = sides.next()?;
    let right = sides.next()?;
    if sides.next().is_some() {
        return None;
    }

    let from = side_square(left)?;

    if let Some(to) = side_square(right) {
        return Some(CoordinateMove::new(from, to, None));
    }

    let (last, rest) = right.split_last()?;
    let promotion = promotion_word(last)?;
    let to = side_square(rest)?;
    Some(CoordinateMove::new(from, to, Some(promotion)))
}

/// Bare squares with no connector:
/// 2-3 words are `e2 e4 [q]`, 4-5 words are `e two e four [queen]`.
fn parse_by_token_count(words: &[&str]) -> Option<CoordinateMove> {
    let (from, to, promo) = match words.len() {
        2 | 3 => (
            compact_square(words[0])?,
            compact_square(words[1])?,
            words.get(2),
        ),
        4 | 5 => (
            split_square(words[0], words[1])?,
            split_square(words[2], words[3])?,
            words.get(4),
        ),
        _ => return None,
    };

    let promotion = match promo {
        Some(word) => Some(promotion_word(word)?),
        None => None,
    };

    Some(CoordinateMove::new(from, to, promotion))
}

/// One compact token or a file + rank pair
fn side_square(words: &[&str]) -> Option<Square> {
    match words {
        [compact] => compact_square(compact),
        [file, rank] => split_square(file, rank),
        _ => None,
    }
}

/// `e4`
fn compact_square(word: &str) -> Option<Square> {
    let mut chars = word.chars();
    let (file, rank) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    square_from_chars(file, rank)
}

/// `e` + `four` / `e` + `4`
fn split_square(file: &str, rank: &str) -> Option<Square> {
    square_from_chars(file_letter(file)?, rank_digit(rank)?)
}

fn file_letter(word: &str) -> Option<char> {
    let mut chars = word.chars();
    let c = chars.next()?;
    if chars.next().is_none() && ('a'..='h').contains(&c) {
        Some(c)
    } else {
        None
    }
}

/// Digit or number word (after fixing common mishearings) to a rank digit
pub fn rank_digit(word: &str) -> Option<char> {
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return ('1'..='8').contains(&c).then_some(c);
    }

    let word = RANK_MISHEARINGS
        .iter()
        .find(|(heard, _)| *heard == word)
        .map_or(word, |(_, meant)| *meant);

    RANK_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, digit)| *digit)
}

/// `queen` / `q` -> Queen, etc.
pub fn promotion_word(word: &str) -> Option<Role> {
    PROMOTION_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, role)| *role)
}
