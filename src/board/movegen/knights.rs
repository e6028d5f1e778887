//! Knight moves.

use super::super::tables::KNIGHT_MOVES;
use super::super::types::{Move, Square};
use super::MoveGenerator;

impl MoveGenerator<'_> {
    pub(super) fn generate_knight_moves(&mut self) {
        for i in 0..self.board.knights[self.us].count() {
            let start = self.board.knights[self.us].get(i);

            // A pinned knight can never stay on its pin ray.
            if self.is_pinned(start) {
                continue;
            }

            let from = Square::from_index(start);
            for target in KNIGHT_MOVES[start].iter() {
                let piece = self.board.square[target];
                if piece.is_color(self.friendly) {
                    continue;
                }
                let is_capture = piece.is_color(self.opponent);
                if !is_capture && !self.gen_quiets {
                    continue;
                }
                if self.in_check && !self.in_check_ray(target) {
                    continue;
                }
                self.moves.push(Move::quiet(from, Square::from_index(target)));
            }
        }
    }
}
