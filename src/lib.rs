//! Chess board state and move legality, FEN in and out, plus perft and
//! random-playout harnesses built on top of the rules core.

pub mod board;
pub mod perft;
pub mod selfplay;
