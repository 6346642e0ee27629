use super::{fen, Color, Coordinate, Move, MoveKind, Piece, PieceKind};

/// Board state: an 8x8 grid of owned piece slots, the side to move and the
/// current en-passant target. The grid is private; pieces enter and leave
/// slots only through `put`/`take`, so a piece is never aliased into two
/// squares at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub en_passant_target: Option<Coordinate>,
}

impl Board {
    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            side_to_move: Color::White,
            en_passant_target: None,
        }
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Piece at a coordinate, or `None` for empty or off-board squares.
    pub fn piece_at(&self, at: Coordinate) -> Option<&Piece> {
        if !at.on_board() {
            return None;
        }
        self.grid[at.rank as usize][at.file as usize].as_ref()
    }

    pub(crate) fn piece_at_mut(&mut self, at: Coordinate) -> Option<&mut Piece> {
        if !at.on_board() {
            return None;
        }
        self.grid[at.rank as usize][at.file as usize].as_mut()
    }

    /// Places a piece into the slot named by its own coordinate.
    pub fn put(&mut self, piece: Piece) {
        let at = piece.coordinate;
        self.grid[at.rank as usize][at.file as usize] = Some(piece);
    }

    pub(crate) fn take(&mut self, at: Coordinate) -> Option<Piece> {
        self.grid[at.rank as usize][at.file as usize].take()
    }

    pub(crate) fn clear(&mut self, at: Coordinate) {
        self.grid[at.rank as usize][at.file as usize] = None;
    }

    /// Iterates over all pieces of one color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.grid
            .iter()
            .flatten()
            .filter_map(move |slot| slot.as_ref().filter(|piece| piece.color == color))
    }

    /// Applies a move in place. This is the sole way callers advance the
    /// game state; an empty origin square is a caller-contract violation
    /// and panics instead of corrupting the position.
    ///
    /// Capture removal happens while the mover is out of the grid, so a
    /// capturing move never briefly duplicates a piece.
    pub fn apply(&mut self, mv: Move) {
        let mut piece = match self.take(mv.origin) {
            Some(piece) => piece,
            None => panic!("apply: no piece at origin {}", mv.origin),
        };
        let color = piece.color;

        if mv.capture {
            self.clear(mv.dest);
        }
        // The en-passant victim sits one rank behind the destination.
        if mv.kind == MoveKind::EnPassant {
            self.clear(mv.dest.offset(-color.forward(), 0));
        }

        piece.coordinate = mv.dest;
        piece.moved = true;
        self.put(piece);

        if mv.kind == MoveKind::Castle {
            let rank = mv.origin.rank;
            let (corner, post) = if mv.dest.file < mv.origin.file {
                (Coordinate::new(rank, 0), Coordinate::new(rank, 3))
            } else {
                (Coordinate::new(rank, 7), Coordinate::new(rank, 5))
            };
            if let Some(mut rook) = self.take(corner) {
                rook.coordinate = post;
                rook.moved = true;
                self.put(rook);
            }
        }

        // Promotion replaces the pawn with a fresh piece, not a mutated one.
        if let Some(kind) = mv.kind.promotion_kind() {
            self.put(Piece {
                color,
                kind,
                coordinate: mv.dest,
                moved: true,
            });
        }

        self.en_passant_target = if mv.kind == MoveKind::DoublePawnPush {
            Some(mv.dest.offset(-color.forward(), 0))
        } else {
            None
        };

        self.side_to_move = self.side_to_move.opposite();
    }

    /// True iff any opposing piece attacks a square holding a king of
    /// `color`. Attacks are unfiltered pseudo-moves with castling
    /// suppressed; a threat does not need to be legal for its own side.
    pub fn in_check(&self, color: Color) -> bool {
        for piece in self.pieces(color.opposite()) {
            for mv in self.attack_moves_from(piece.coordinate) {
                if matches!(
                    self.piece_at(mv.dest),
                    Some(p) if p.kind == PieceKind::King && p.color == color
                ) {
                    return true;
                }
            }
        }
        false
    }

    pub fn checkmated(&self, color: Color) -> bool {
        if !self.in_check(color) {
            return false;
        }
        self.pieces(color)
            .all(|piece| self.legal_moves_from(piece.coordinate).is_empty())
    }

    pub fn stalemated(&self, color: Color) -> bool {
        if self.in_check(color) {
            return false;
        }
        self.pieces(color)
            .all(|piece| self.legal_moves_from(piece.coordinate).is_empty())
    }

    /// Resolves long-algebraic move text ("e2e4", "g7g8q") against the
    /// current legal moves, so the returned `Move` carries the right kind
    /// and capture flag.
    pub fn parse_move(&self, text: &str) -> Result<Move, String> {
        if !text.is_ascii() || text.len() < 4 {
            return Err(format!("invalid move: {}", text));
        }
        let origin = Coordinate::from_algebraic(&text[0..2])?;
        let dest = Coordinate::from_algebraic(&text[2..4])?;
        let promotion = match &text[4..] {
            "" => None,
            "n" | "N" => Some(PieceKind::Knight),
            "b" | "B" => Some(PieceKind::Bishop),
            "r" | "R" => Some(PieceKind::Rook),
            "q" | "Q" => Some(PieceKind::Queen),
            other => return Err(format!("invalid promotion piece: {}", other)),
        };
        self.legal_moves_from(origin)
            .into_iter()
            .find(|mv| mv.dest == dest && mv.kind.promotion_kind() == promotion)
            .ok_or_else(|| format!("illegal move: {}", text))
    }

    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        out.push_str("    a   b   c   d   e   f   g   h  \n");
        out.push_str("  +---+---+---+---+---+---+---+---+\n");
        for rank in (0..8).rev() {
            out.push_str(&format!("{} |", rank + 1));
            for file in 0..8 {
                let square = match self.piece_at(Coordinate::new(rank, file)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                out.push_str(&format!(" {} |", square));
            }
            out.push_str(&format!(" {}\n", rank + 1));
            out.push_str("  +---+---+---+---+---+---+---+---+\n");
        }
        out
    }
}
