//! Coordinate move notation
//!
//! The canonical form shared by typed and spoken input: source square,
//! destination square and an optional promotion letter (`e2e4`, `e7e8q`).

use shakmaty::uci::UciMove;
use shakmaty::{Chess, File, Move, Rank, Role, Square};
use std::fmt;
use std::str::FromStr;

/// A move written as two squares plus optional promotion.
///
/// Well-formedness only; legality is decided by [`CoordinateMove::to_legal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

/// Why a string is not a coordinate move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a coordinate move: '{0}'")]
pub struct ParseCoordinateError(pub String);

impl CoordinateMove {
    pub fn new(from: Square, to: Square, promotion: Option<Role>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Resolve against a position. `None` when the rules engine rejects it.
    pub fn to_legal(&self, pos: &Chess) -> Option<Move> {
        UciMove::Normal {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
        .to_move(pos)
        .ok()
    }
}

impl fmt::Display for CoordinateMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

impl FromStr for CoordinateMove {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordinateError(s.to_string());
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(err());
        }

        let from = square_from_chars(chars[0], chars[1]).ok_or_else(err)?;
        let to = square_from_chars(chars[2], chars[3]).ok_or_else(err)?;
        let promotion = match chars.get(4) {
            Some(&c) => Some(promotion_from_char(c).ok_or_else(err)?),
            None => None,
        };

        Ok(Self::new(from, to, promotion))
    }
}

/// `'e', '4'` -> e4
pub fn square_from_chars(file: char, rank: char) -> Option<Square> {
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(Square::from_coords(
        File::from_char(file)?,
        Rank::from_char(rank)?,
    ))
}

/// Promotion letters allowed in coordinate form: q, r, b, n
pub fn promotion_from_char(c: char) -> Option<Role> {
    match c {
        'q' => Some(Role::Queen),
        'r' => Some(Role::Rook),
        'b' => Some(Role::Bishop),
        'n' => Some(Role::Knight),
        _ => None,
    }
}
