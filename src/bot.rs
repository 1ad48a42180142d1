//! Random-move opponent
//!
//! Picks uniformly among legal moves. A stand-in until a real engine is
//! wired up.

use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::{Chess, Move, Position};

/// Choose a legal move, or `None` when there are none
pub fn random_move<R: Rng + ?Sized>(pos: &Chess, rng: &mut R) -> Option<Move> {
    let legals = pos.legal_moves();
    legals.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shakmaty::fen::Fen;
    use shakmaty::CastlingMode;

    #[test]
    fn test_move_is_legal() {
        let pos = Chess::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mv = random_move(&pos, &mut rng).expect("opening has moves");
            assert!(pos.is_legal(mv));
        }
    }

    #[test]
    fn test_seeded_choice_is_reproducible() {
        let pos = Chess::default();
        let a = random_move(&pos, &mut StdRng::seed_from_u64(42));
        let b = random_move(&pos, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_covers_many_moves() {
        let pos = Chess::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            if let Some(mv) = random_move(&pos, &mut rng) {
                seen.insert(format!("{:?}", mv));
            }
        }
        // 20 legal opening moves; uniform picks hit nearly all of them
        assert!(seen.len() >= 18, "only saw {} distinct moves", seen.len());
    }

    #[test]
    fn test_no_moves_when_mated() {
        let fen: Fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .expect("valid fen");
        let pos: Chess = fen
            .into_position(CastlingMode::Standard)
            .expect("legal position");
        assert!(pos.is_checkmate());
        assert_eq!(random_move(&pos, &mut StdRng::seed_from_u64(0)), None);
    }
}
