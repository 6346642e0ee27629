use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::board::{Board, Color, Move};

/// How a random playout ended. The color inside the terminal variants is
/// the side that had no legal reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate(Color),
    Stalemate(Color),
    PlyLimit,
}

pub struct PlayoutReport {
    pub outcome: Outcome,
    pub plies: u32,
    pub moves: Vec<Move>,
}

/// Plays uniformly random legal moves from the given position until mate,
/// stalemate or the ply limit. Seeded so runs are reproducible.
pub fn random_playout(fen: &str, max_plies: u32, seed: u64) -> Result<PlayoutReport, String> {
    let mut board = Board::from_fen(fen)?;
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut moves = Vec::new();

    for plies in 0..max_plies {
        let mover = board.side_to_move;
        let legal = board.legal_moves(mover);
        if legal.is_empty() {
            let outcome = if board.in_check(mover) {
                Outcome::Checkmate(mover)
            } else {
                Outcome::Stalemate(mover)
            };
            return Ok(PlayoutReport { outcome, plies, moves });
        }
        let mv = legal[rng.gen_range(0..legal.len())];
        board.apply(mv);
        moves.push(mv);
    }

    Ok(PlayoutReport { outcome: Outcome::PlyLimit, plies: max_plies, moves })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coordinate, MoveKind, INITIAL_POSITION};

    #[test]
    fn test_playout_is_deterministic_per_seed() {
        let a = random_playout(INITIAL_POSITION, 40, 7).unwrap();
        let b = random_playout(INITIAL_POSITION, 40, 7).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_playout_never_leaves_mover_in_check() {
        for seed in 0..4 {
            let report = random_playout(INITIAL_POSITION, 60, seed).unwrap();
            let mut board = Board::from_fen(INITIAL_POSITION).unwrap();
            for mv in report.moves {
                let mover = board.side_to_move;
                board.apply(mv);
                assert!(!board.in_check(mover), "{} left {:?} in check", mv, mover);
            }
        }
    }

    #[test]
    fn test_playout_en_passant_target_lifecycle() {
        let report = random_playout(INITIAL_POSITION, 60, 3).unwrap();
        let mut board = Board::from_fen(INITIAL_POSITION).unwrap();
        for mv in report.moves {
            let forward = board.side_to_move.forward();
            board.apply(mv);
            match mv.kind {
                MoveKind::DoublePawnPush => {
                    let skipped = Coordinate::new(mv.dest.rank - forward, mv.dest.file);
                    assert_eq!(board.en_passant_target, Some(skipped));
                }
                _ => assert_eq!(board.en_passant_target, None),
            }
        }
    }

    #[test]
    fn test_playout_reports_checkmate() {
        let report = random_playout("7k/6P1/6K1/8/2B5/8/8/8 b - - 0 1", 10, 0).unwrap();
        assert_eq!(report.outcome, Outcome::Checkmate(Color::Black));
        assert_eq!(report.plies, 0);
        assert!(report.moves.is_empty());
    }

    #[test]
    fn test_playout_reports_stalemate() {
        let report = random_playout("k7/8/1Q6/8/8/8/8/7K b - - 0 1", 10, 0).unwrap();
        assert_eq!(report.outcome, Outcome::Stalemate(Color::Black));
    }

    #[test]
    fn test_playout_honors_ply_limit() {
        let report = random_playout(INITIAL_POSITION, 4, 1).unwrap();
        assert_eq!(report.outcome, Outcome::PlyLimit);
        assert_eq!(report.plies, 4);
        assert_eq!(report.moves.len(), 4);
    }

    #[test]
    fn test_playout_rejects_bad_fen() {
        assert!(random_playout("not a position", 10, 0).is_err());
    }
}
