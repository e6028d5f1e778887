//! Rook, bishop and queen moves.

use super::super::tables::{moving_along_ray, DIRECTION_OFFSETS, SQUARES_TO_EDGE};
use super::super::types::{Move, Square};
use super::MoveGenerator;

impl MoveGenerator<'_> {
    pub(super) fn generate_sliding_moves(&mut self) {
        for i in 0..self.board.rooks[self.us].count() {
            let sq = self.board.rooks[self.us].get(i);
            self.generate_sliding_piece(sq, 0, 4);
        }
        for i in 0..self.board.bishops[self.us].count() {
            let sq = self.board.bishops[self.us].get(i);
            self.generate_sliding_piece(sq, 4, 8);
        }
        for i in 0..self.board.queens[self.us].count() {
            let sq = self.board.queens[self.us].get(i);
            self.generate_sliding_piece(sq, 0, 8);
        }
    }

    fn generate_sliding_piece(&mut self, start: usize, start_dir: usize, end_dir: usize) {
        let pinned = self.is_pinned(start);

        // A pinned piece can never interpose or capture the checker.
        if self.in_check && pinned {
            return;
        }

        let from = Square::from_index(start);
        for dir in start_dir..end_dir {
            let offset = DIRECTION_OFFSETS[dir];
            if pinned && !moving_along_ray(offset, self.king_sq, start) {
                continue;
            }

            for n in 0..SQUARES_TO_EDGE[start][dir] {
                let target = (start as i32 + offset * (n as i32 + 1)) as usize;
                let piece = self.board.square[target];

                if piece.is_color(self.friendly) {
                    break;
                }
                let is_capture = !piece.is_none();
                let blocks_check = self.in_check_ray(target);

                if (blocks_check || !self.in_check) && (self.gen_quiets || is_capture) {
                    self.moves.push(Move::quiet(from, Square::from_index(target)));
                }

                // Past a capture or an interposition square the ray is done.
                if is_capture || blocks_check {
                    break;
                }
            }
        }
    }
}
