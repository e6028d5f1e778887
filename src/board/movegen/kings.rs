//! King moves and castling.

use super::super::tables::KING_MOVES;
use super::super::types::{Move, Square};
use super::MoveGenerator;

impl MoveGenerator<'_> {
    pub(super) fn generate_king_moves(&mut self) {
        let from = Square::from_index(self.king_sq);

        for target in KING_MOVES[self.king_sq].iter() {
            let piece = self.board.square[target];
            if piece.is_color(self.friendly) {
                continue;
            }
            let is_capture = piece.is_color(self.opponent);
            if !is_capture && !self.gen_quiets {
                continue;
            }
            // The attack map sees through the king, so squares behind it on
            // a check ray are still marked attacked.
            if self.square_attacked(target) {
                continue;
            }
            self.moves.push(Move::quiet(from, Square::from_index(target)));
        }

        if self.in_check || !self.gen_quiets {
            return;
        }
        self.generate_castling(from);
    }

    fn generate_castling(&mut self, from: Square) {
        let base = if self.white_to_move { 0 } else { 56 };

        // Kingside: f and g empty, e/f/g unattacked (e is covered by the
        // not-in-check gate above).
        if self.board.has_castling_right(self.friendly, true)
            && self.board.square[base + 5].is_none()
            && self.board.square[base + 6].is_none()
            && !self.square_attacked(base + 5)
            && !self.square_attacked(base + 6)
        {
            self.moves
                .push(Move::castling(from, Square::from_index(base + 6)));
        }

        // Queenside: b, c and d empty, e/d/c unattacked. The b-square may be
        // attacked; only the rook passes through it.
        if self.board.has_castling_right(self.friendly, false)
            && self.board.square[base + 3].is_none()
            && self.board.square[base + 2].is_none()
            && self.board.square[base + 1].is_none()
            && !self.square_attacked(base + 3)
            && !self.square_attacked(base + 2)
        {
            self.moves
                .push(Move::castling(from, Square::from_index(base + 2)));
        }
    }
}
