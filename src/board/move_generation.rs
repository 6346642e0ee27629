use super::{Board, Color, Coordinate, Move, MoveKind, Piece, PieceKind};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];
const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

impl Board {
    /// Pseudo-legal moves for the piece on `at`, or an empty list if the
    /// square is empty. Destinations may be friendly-occupied; the legality
    /// filter drops those downstream.
    pub fn pseudo_moves_from(&self, at: Coordinate) -> Vec<Move> {
        self.candidate_moves(at, false)
    }

    /// `check_probe` suppresses castling generation. Check detection probes
    /// attacks through this flag, which breaks the mutual recursion between
    /// castling safety and check detection.
    fn candidate_moves(&self, at: Coordinate, check_probe: bool) -> Vec<Move> {
        let piece = match self.piece_at(at) {
            Some(piece) => *piece,
            None => return Vec::new(),
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(&piece),
            PieceKind::Knight => self.knight_moves(&piece),
            PieceKind::Bishop => self.ray_moves(&piece, &DIAGONAL_DIRECTIONS),
            PieceKind::Rook => self.ray_moves(&piece, &STRAIGHT_DIRECTIONS),
            PieceKind::Queen => {
                let mut moves = self.ray_moves(&piece, &DIAGONAL_DIRECTIONS);
                moves.extend(self.ray_moves(&piece, &STRAIGHT_DIRECTIONS));
                moves
            }
            PieceKind::King => self.king_moves(&piece, check_probe),
        }
    }

    fn pawn_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let origin = piece.coordinate;
        let forward = piece.color.forward();

        let one_ahead = origin.offset(forward, 0);
        if one_ahead.on_board() && self.piece_at(one_ahead).is_none() {
            Self::push_pawn_move(origin, one_ahead, false, piece.color, &mut moves);

            // A blocked single step also rules out the double step.
            let two_ahead = origin.offset(2 * forward, 0);
            if !piece.moved
                && origin.rank == piece.color.pawn_start_rank()
                && two_ahead.on_board()
                && self.piece_at(two_ahead).is_none()
            {
                moves.push(Move::new(origin, two_ahead).with_kind(MoveKind::DoublePawnPush));
            }
        }

        for file_offset in [-1, 1] {
            let diagonal = origin.offset(forward, file_offset);
            if !diagonal.on_board() {
                continue;
            }
            if self.en_passant_target == Some(diagonal) {
                moves.push(
                    Move::new(origin, diagonal)
                        .with_capture(true)
                        .with_kind(MoveKind::EnPassant),
                );
            } else if self.piece_at(diagonal).is_some() {
                Self::push_pawn_move(origin, diagonal, true, piece.color, &mut moves);
            }
        }

        moves
    }

    /// Fans a pawn move out into the four promotion kinds on the back rank.
    fn push_pawn_move(
        origin: Coordinate,
        dest: Coordinate,
        capture: bool,
        color: Color,
        moves: &mut Vec<Move>,
    ) {
        if dest.rank == color.promotion_rank() {
            for kind in [
                MoveKind::PromoteKnight,
                MoveKind::PromoteBishop,
                MoveKind::PromoteRook,
                MoveKind::PromoteQueen,
            ] {
                moves.push(Move::new(origin, dest).with_capture(capture).with_kind(kind));
            }
        } else {
            moves.push(Move::new(origin, dest).with_capture(capture));
        }
    }

    fn knight_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(rank, file) in &KNIGHT_OFFSETS {
            let dest = piece.coordinate.offset(rank, file);
            if dest.on_board() {
                moves.push(
                    Move::new(piece.coordinate, dest).with_capture(self.piece_at(dest).is_some()),
                );
            }
        }
        moves
    }

    /// Sliding moves for rook, bishop and queen: each ray runs to the board
    /// edge or the first occupied square, which is included as a capture
    /// candidate and ends the ray.
    fn ray_moves(&self, piece: &Piece, directions: &[(i8, i8); 4]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(rank, file) in directions {
            let mut dest = piece.coordinate.offset(rank, file);
            while dest.on_board() {
                let occupied = self.piece_at(dest).is_some();
                moves.push(Move::new(piece.coordinate, dest).with_capture(occupied));
                if occupied {
                    break;
                }
                dest = dest.offset(rank, file);
            }
        }
        moves
    }

    fn king_moves(&self, piece: &Piece, check_probe: bool) -> Vec<Move> {
        let mut moves = Vec::new();
        for rank in -1..=1 {
            for file in -1..=1 {
                if rank == 0 && file == 0 {
                    continue;
                }
                let dest = piece.coordinate.offset(rank, file);
                if dest.on_board() {
                    moves.push(
                        Move::new(piece.coordinate, dest)
                            .with_capture(self.piece_at(dest).is_some()),
                    );
                }
            }
        }

        if check_probe || piece.moved || self.in_check(piece.color) {
            return moves;
        }

        let rank = piece.color.back_rank();

        // Queenside: unmoved corner rook, b/c/d empty, king safe on c.
        if self.castle_rook_ready(Coordinate::new(rank, 0))
            && [1, 2, 3]
                .iter()
                .all(|&file| self.piece_at(Coordinate::new(rank, file)).is_none())
            && self.king_safe_at(piece, Coordinate::new(rank, 2))
        {
            moves.push(
                Move::new(piece.coordinate, Coordinate::new(rank, 2)).with_kind(MoveKind::Castle),
            );
        }

        // Kingside: unmoved corner rook, f/g empty, king safe on g.
        if self.castle_rook_ready(Coordinate::new(rank, 7))
            && [5, 6]
                .iter()
                .all(|&file| self.piece_at(Coordinate::new(rank, file)).is_none())
            && self.king_safe_at(piece, Coordinate::new(rank, 6))
        {
            moves.push(
                Move::new(piece.coordinate, Coordinate::new(rank, 6)).with_kind(MoveKind::Castle),
            );
        }

        moves
    }

    fn castle_rook_ready(&self, corner: Coordinate) -> bool {
        matches!(
            self.piece_at(corner),
            Some(piece) if piece.kind == PieceKind::Rook && !piece.moved
        )
    }

    /// Probes a scratch board with the king transplanted to `dest`.
    fn king_safe_at(&self, king: &Piece, dest: Coordinate) -> bool {
        let mut probe = self.clone();
        probe.clear(king.coordinate);
        let mut moved_king = *king;
        moved_king.coordinate = dest;
        probe.put(moved_king);
        !probe.in_check(king.color)
    }

    /// Pseudo-moves restricted to what can attack a square: castling is
    /// suppressed and off-board or friendly-occupied destinations are
    /// dropped, but nothing is simulated.
    pub fn attack_moves_from(&self, at: Coordinate) -> Vec<Move> {
        let color = match self.piece_at(at) {
            Some(piece) => piece.color,
            None => return Vec::new(),
        };
        self.candidate_moves(at, true)
            .into_iter()
            .filter(|mv| mv.dest.on_board())
            .filter(|mv| !matches!(self.piece_at(mv.dest), Some(piece) if piece.color == color))
            .collect()
    }

    /// Legal moves for the piece on `at`: pseudo-moves minus friendly
    /// destinations, minus anything that leaves the mover's own king in
    /// check when simulated on a scratch copy. Simulate-and-reject over
    /// pin detection; correctness first.
    pub fn legal_moves_from(&self, at: Coordinate) -> Vec<Move> {
        let piece = match self.piece_at(at) {
            Some(piece) => *piece,
            None => return Vec::new(),
        };
        let mut moves = Vec::new();
        for mv in self.candidate_moves(at, false) {
            if !mv.dest.on_board() {
                continue;
            }
            if matches!(self.piece_at(mv.dest), Some(other) if other.color == piece.color) {
                continue;
            }
            let mut scratch = self.clone();
            scratch.apply(mv);
            if scratch.in_check(piece.color) {
                continue;
            }
            moves.push(mv);
        }
        moves
    }

    /// All legal moves for one color.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces(color) {
            moves.extend(self.legal_moves_from(piece.coordinate));
        }
        moves
    }
}
