use crate::board::Board;

pub fn perft(board: &Board, depth: u8) -> u64 {
    let mut node_count = 0u64;

    if depth == 0 {
        return 1u64;
    }

    for mv in board.legal_moves(board.side_to_move) {
        let mut new_board = board.clone();
        new_board.apply(mv);
        node_count += perft(&new_board, depth - 1);
    }
    node_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_initial_position() {
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 20u64);
        assert_eq!(perft(&board, 2), 400u64);
        assert_eq!(perft(&board, 3), 8902u64);
        assert_eq!(perft(&board, 4), 197281u64);
    }

    #[test]
    fn test_perft_pawn_endgame() {
        // Exercises en passant and pawn pins without any castling.
        let board = Board::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 14);
        assert_eq!(perft(&board, 2), 191);
        assert_eq!(perft(&board, 3), 2812);
        assert_eq!(perft(&board, 4), 43238);
    }

    #[test]
    fn test_perft_promotions() {
        //http://www.rocechess.ch/perft.html
        let board = Board::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
        assert_eq!(perft(&board, 1), 24);
        assert_eq!(perft(&board, 2), 496);
        assert_eq!(perft(&board, 3), 9483);
        assert_eq!(perft(&board, 4), 182838);
    }
}
