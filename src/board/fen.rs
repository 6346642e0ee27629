use super::{Board, Color, Coordinate, Piece, PieceKind};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn piece_from_char(c: char) -> Option<(Color, PieceKind)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((color, kind))
}

/// Parses a FEN string and sets up a `Board`.
///
/// The board does not keep castling rights as separate state: an absent
/// rights letter is recorded by flagging the matching corner rook as
/// already moved. The halfmove/fullmove counters are validated but not
/// stored; the core does not track them.
pub fn from_fen(fen: &str) -> Result<Board, String> {
    let mut board = Board::empty();
    let parts: Vec<&str> = fen.split(' ').collect();
    if parts.len() != 6 {
        return Err(String::from("Invalid FEN string: must have 6 parts."));
    }

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(String::from("Invalid FEN string: expected 8 ranks"));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = (7 - i) as i8;
        let mut file: i8 = 0;

        for c in rank_str.chars() {
            if file > 7 {
                return Err(format!("Too many squares in rank {} when parsing FEN", rank + 1));
            }
            if let Some(d) = c.to_digit(10) {
                file += d as i8;
            } else if let Some((color, kind)) = piece_from_char(c) {
                let at = Coordinate::new(rank, file);
                board.put(Piece::new(color, kind, at));
                file += 1;
            } else {
                return Err(format!("Invalid piece character in FEN string: {}", c));
            }
        }
        if file != 8 {
            return Err(format!(
                "Invalid FEN string: rank {} does not describe 8 files",
                rank + 1
            ));
        }
    }

    board.side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(String::from("Invalid FEN string: invalid active color.")),
    };

    // An absent castling-rights letter marks the matching corner rook as
    // already moved.
    let rights = parts[2];
    for (letter, corner) in [
        ('Q', Coordinate::new(0, 0)),
        ('K', Coordinate::new(0, 7)),
        ('q', Coordinate::new(7, 0)),
        ('k', Coordinate::new(7, 7)),
    ] {
        if !rights.contains(letter) {
            if let Some(rook) = board.piece_at_mut(corner) {
                if rook.kind == PieceKind::Rook {
                    rook.moved = true;
                }
            }
        }
    }

    board.en_passant_target = if parts[3] == "-" {
        None
    } else {
        Some(Coordinate::from_algebraic(parts[3])?)
    };

    parts[4]
        .parse::<u32>()
        .map_err(|_| format!("Invalid FEN string: halfmove clock is not a valid number: {}", parts[4]))?;
    parts[5]
        .parse::<u32>()
        .map_err(|_| format!("Invalid FEN string: fullmove number is not a valid number: {}", parts[5]))?;

    Ok(board)
}

/// True when the corner rook and the king on its home square are both
/// still unmoved, i.e. the matching rights letter belongs in the FEN.
fn castling_available(board: &Board, color: Color, corner_file: i8) -> bool {
    let rank = color.back_rank();
    let king_home = Coordinate::new(rank, 4);
    let king_ready = matches!(
        board.piece_at(king_home),
        Some(p) if p.kind == PieceKind::King && p.color == color && !p.moved
    );
    king_ready
        && matches!(
            board.piece_at(Coordinate::new(rank, corner_file)),
            Some(p) if p.kind == PieceKind::Rook && !p.moved
        )
}

/// Emits the position as FEN. The halfmove and fullmove fields are not
/// tracked by the core and are emitted as "0 1".
pub fn to_fen(board: &Board) -> String {
    let mut placement = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0;

        for file in 0..8 {
            match board.piece_at(Coordinate::new(rank, file)) {
                Some(piece) => {
                    if empty_count > 0 {
                        placement.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    placement.push(piece.to_char());
                }
                None => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            placement.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let side = match board.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    if castling_available(board, Color::White, 7) {
        castling.push('K');
    }
    if castling_available(board, Color::White, 0) {
        castling.push('Q');
    }
    if castling_available(board, Color::Black, 7) {
        castling.push('k');
    }
    if castling_available(board, Color::Black, 0) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match board.en_passant_target {
        Some(square) => square.as_algebraic(),
        None => "-".to_string(),
    };

    format!("{} {} {} {} 0 1", placement, side, castling, en_passant)
}
