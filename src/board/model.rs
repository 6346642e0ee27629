use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction this color's pawns advance in.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(&self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_start_rank(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(&self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// Rank/file pair. Signed so candidate-move arithmetic may step off the
/// board before `on_board` filtering.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Coordinate {
    pub rank: i8,
    pub file: i8,
}

impl Coordinate {
    pub fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    pub fn on_board(&self) -> bool {
        (0..8).contains(&self.rank) && (0..8).contains(&self.file)
    }

    pub fn offset(&self, rank: i8, file: i8) -> Self {
        Self::new(self.rank + rank, self.file + file)
    }

    pub fn from_algebraic(square: &str) -> Result<Self, String> {
        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square: {}", square));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(format!("invalid square: {}", square));
        }
        Ok(Self::new(rank as i8, file as i8))
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// A piece as it sits on the board. `moved` is the single source of truth
/// for pawn-double-step and castling eligibility. Each piece is owned by
/// exactly one grid slot; moving it transfers the value between slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub coordinate: Coordinate,
    pub moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, coordinate: Coordinate) -> Self {
        Self {
            color,
            kind,
            coordinate,
            moved: false,
        }
    }

    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub enum MoveKind {
    Default,
    Castle,
    EnPassant,
    PromoteKnight,
    PromoteBishop,
    PromoteRook,
    PromoteQueen,
    DoublePawnPush,
}

impl MoveKind {
    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self {
            MoveKind::PromoteKnight => Some(PieceKind::Knight),
            MoveKind::PromoteBishop => Some(PieceKind::Bishop),
            MoveKind::PromoteRook => Some(PieceKind::Rook),
            MoveKind::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

/// Immutable move descriptor, produced by the generator and consumed once
/// by `Board::apply`. `capture` is true iff applying the move removes a
/// piece; for en passant the captured pawn is not at `dest`. At the pseudo
/// level the flag is also set for friendly-occupied destinations, which the
/// legality filter drops.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Move {
    pub origin: Coordinate,
    pub dest: Coordinate,
    pub capture: bool,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(origin: Coordinate, dest: Coordinate) -> Self {
        Self {
            origin,
            dest,
            capture: false,
            kind: MoveKind::Default,
        }
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.origin.as_algebraic(), self.dest.as_algebraic());
        match self.kind.promotion_kind() {
            Some(kind) => format!("{}{}", base_move, kind.letter()),
            None => base_move,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_conversion() {
        assert_eq!(Coordinate::from_algebraic("b2").unwrap(), Coordinate::new(1, 1));
        assert_eq!(Coordinate::from_algebraic("b2").unwrap().as_algebraic(), "b2");
        assert_eq!(Coordinate::from_algebraic("a1").unwrap(), Coordinate::new(0, 0));
        assert_eq!(Coordinate::from_algebraic("h8").unwrap(), Coordinate::new(7, 7));
        assert!(Coordinate::from_algebraic("i1").is_err());
        assert!(Coordinate::from_algebraic("a9").is_err());
        assert!(Coordinate::from_algebraic("e10").is_err());
    }

    #[test]
    fn test_move_as_algebraic() {
        let mv = Move::new(
            Coordinate::from_algebraic("e2").unwrap(),
            Coordinate::from_algebraic("e4").unwrap(),
        );
        assert_eq!(mv.as_algebraic(), "e2e4");

        let promo = Move::new(
            Coordinate::from_algebraic("g7").unwrap(),
            Coordinate::from_algebraic("g8").unwrap(),
        )
        .with_kind(MoveKind::PromoteQueen);
        assert_eq!(promo.as_algebraic(), "g7g8q");
    }

    #[test]
    fn test_on_board_bounds() {
        assert!(Coordinate::new(0, 0).on_board());
        assert!(Coordinate::new(7, 7).on_board());
        assert!(!Coordinate::new(-1, 4).on_board());
        assert!(!Coordinate::new(4, 8).on_board());
        assert!(!Coordinate::new(0, 0).offset(-1, 0).on_board());
    }

    #[test]
    fn test_piece_to_char() {
        let white_knight = Piece::new(Color::White, PieceKind::Knight, Coordinate::new(0, 1));
        let black_queen = Piece::new(Color::Black, PieceKind::Queen, Coordinate::new(7, 3));
        assert_eq!(white_knight.to_char(), 'N');
        assert_eq!(black_queen.to_char(), 'q');
    }
}
