pub mod fen;
pub mod model;
pub use fen::INITIAL_POSITION;
pub use model::{Color, Coordinate, Move, MoveKind, Piece, PieceKind};

mod board;
mod move_generation;
pub mod test_utils;
pub use board::Board;
