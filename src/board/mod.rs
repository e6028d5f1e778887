//! Chess board representation and move generation.
//!
//! The position keeps a square-centric map alongside per-color piece lists;
//! the generator emits strictly legal moves in one pass using pin and check
//! masks, and the executor makes and unmakes moves reversibly.
//!
//! # Example
//! ```
//! use chess_core::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod error;
mod fen;
mod make_unmake;
mod movegen;
mod state;
mod tables;
mod types;

mod debug;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use state::{Board, UnmakeInfo};
pub use types::{Color, Move, MoveList, Piece, Square};
