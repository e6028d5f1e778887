//! Cross-check diagnostics for the board's redundant state.
//!
//! The square map is authoritative; piece lists, king squares and the
//! incremental Zobrist key mirror it. `validate` re-derives everything and
//! panics on the first divergence, naming it.

use super::types::{Color, ColoredPiece, Piece, Square};
use super::Board;

impl Board {
    /// Assert every structural invariant of the position. Test-suite use
    /// only; the hot path never pays for this.
    pub fn validate(&self) {
        let mut derived = [ColoredPiece::NONE; 64];

        for color in [Color::White, Color::Black] {
            let c_idx = color.index();
            for piece in [
                Piece::Pawn,
                Piece::Knight,
                Piece::Bishop,
                Piece::Rook,
                Piece::Queen,
            ] {
                for sq in self.piece_list(piece, c_idx).iter() {
                    assert!(
                        derived[sq].is_none(),
                        "square {} appears in two piece lists",
                        Square::from_index(sq)
                    );
                    derived[sq] = ColoredPiece::new(color, piece);
                }
            }

            let king_sq = self.king_square[c_idx].index();
            assert!(
                derived[king_sq].is_none(),
                "{color} king square {} collides with a listed piece",
                self.king_square[c_idx]
            );
            derived[king_sq] = ColoredPiece::new(color, Piece::King);
        }

        for sq in 0..64 {
            assert!(
                self.square[sq] == derived[sq],
                "square map desync at {}: map has {:?}, lists have {:?}",
                Square::from_index(sq),
                self.square[sq],
                derived[sq]
            );
        }

        assert_eq!(
            self.zobrist_key,
            self.calculate_hash(),
            "incremental zobrist key diverged from recomputed key"
        );

        for (color, kingside, king_home, rook_home) in [
            (Color::White, true, 4usize, 7usize),
            (Color::White, false, 4, 0),
            (Color::Black, true, 60, 63),
            (Color::Black, false, 60, 56),
        ] {
            if self.has_castling_right(color, kingside) {
                assert_eq!(
                    self.square[king_home],
                    ColoredPiece::new(color, Piece::King),
                    "{color} castling right held without king on its home square"
                );
                assert_eq!(
                    self.square[rook_home],
                    ColoredPiece::new(color, Piece::Rook),
                    "{color} castling right held without rook on {}",
                    Square::from_index(rook_home)
                );
            }
        }

        if let Some(file) = self.ep_file() {
            // The double-pushed pawn stands on the rank in front of the EP
            // target, and it belongs to the side that just moved.
            let (pawn_rank, pawn_color) = if self.white_to_move {
                (4, Color::Black)
            } else {
                (3, Color::White)
            };
            let pawn_sq = Square::new(pawn_rank, file);
            assert_eq!(
                self.square[pawn_sq.index()],
                ColoredPiece::new(pawn_color, Piece::Pawn),
                "en-passant file set without a double-pushed pawn on {pawn_sq}"
            );
        }
    }
}
