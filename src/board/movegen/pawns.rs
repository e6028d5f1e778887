//! Pawn moves: pushes, captures, promotions, en passant.

use super::super::tables::{
    moving_along_ray, DIRECTION_OFFSETS, PAWN_ATTACK_DIRS, SQUARES_TO_EDGE,
};
use super::super::types::{ColoredPiece, Move, Piece, Square, PROMOTION_PIECES};
use super::MoveGenerator;

impl MoveGenerator<'_> {
    pub(super) fn generate_pawn_moves(&mut self) {
        let push_offset: i32 = if self.white_to_move { 8 } else { -8 };
        let start_rank = if self.white_to_move { 1 } else { 6 };
        let rank_before_promotion = if self.white_to_move { 6 } else { 1 };

        let ep_square: Option<usize> = self.board.ep_square().map(Square::index);

        for i in 0..self.board.pawns[self.us].count() {
            let start = self.board.pawns[self.us].get(i);
            let rank = start >> 3;
            let one_from_promotion = rank == rank_before_promotion;

            if self.gen_quiets {
                let one_forward = (start as i32 + push_offset) as usize;
                if self.board.square[one_forward].is_none() {
                    // A pinned pawn may only push along the king-pawn file.
                    if !self.is_pinned(start)
                        || moving_along_ray(push_offset, start, self.king_sq)
                    {
                        if !self.in_check || self.in_check_ray(one_forward) {
                            if one_from_promotion {
                                self.push_promotions(start, one_forward);
                            } else {
                                self.moves.push(Move::quiet(
                                    Square::from_index(start),
                                    Square::from_index(one_forward),
                                ));
                            }
                        }

                        if rank == start_rank {
                            let two_forward = (one_forward as i32 + push_offset) as usize;
                            if self.board.square[two_forward].is_none()
                                && (!self.in_check || self.in_check_ray(two_forward))
                            {
                                self.moves.push(Move::pawn_two_forward(
                                    Square::from_index(start),
                                    Square::from_index(two_forward),
                                ));
                            }
                        }
                    }
                }
            }

            for &dir in &PAWN_ATTACK_DIRS[self.us] {
                if SQUARES_TO_EDGE[start][dir] == 0 {
                    continue;
                }
                let capture_offset = DIRECTION_OFFSETS[dir];
                let target = (start as i32 + capture_offset) as usize;

                if self.is_pinned(start)
                    && !moving_along_ray(capture_offset, self.king_sq, start)
                {
                    continue;
                }

                if self.board.square[target].is_color(self.opponent) {
                    if self.in_check && !self.in_check_ray(target) {
                        continue;
                    }
                    if one_from_promotion {
                        self.push_promotions(start, target);
                    } else {
                        self.moves.push(Move::quiet(
                            Square::from_index(start),
                            Square::from_index(target),
                        ));
                    }
                }

                if Some(target) == ep_square {
                    let captured_sq = (target as i32 - push_offset) as usize;
                    if !self.in_check_after_en_passant(start, target, captured_sq) {
                        self.moves.push(Move::en_passant(
                            Square::from_index(start),
                            Square::from_index(target),
                        ));
                    }
                }
            }
        }
    }

    fn push_promotions(&mut self, from: usize, to: usize) {
        let from = Square::from_index(from);
        let to = Square::from_index(to);
        for piece in PROMOTION_PIECES {
            self.moves.push(Move::promotion(from, to, piece));
        }
    }

    /// En passant is the one move that empties two squares at once, so the
    /// pin/check masks cannot vouch for it. Perform the capture on the
    /// square map, test the king, and restore the squares unconditionally.
    fn in_check_after_en_passant(
        &mut self,
        start: usize,
        target: usize,
        captured_sq: usize,
    ) -> bool {
        self.board.square[target] = self.board.square[start];
        self.board.square[start] = ColoredPiece::NONE;
        self.board.square[captured_sq] = ColoredPiece::NONE;

        let attacked = self.king_attacked_after_en_passant(captured_sq);

        self.board.square[target] = ColoredPiece::NONE;
        self.board.square[start] = ColoredPiece::new(self.friendly, Piece::Pawn);
        self.board.square[captured_sq] = ColoredPiece::new(self.opponent, Piece::Pawn);

        attacked
    }

    fn king_attacked_after_en_passant(&self, captured_sq: usize) -> bool {
        if (self.opponent_attack_map_no_pawns >> self.king_sq) & 1 != 0 {
            return true;
        }

        // Removing both pawns can only open the king's rank: walk toward the
        // captured pawn's side looking for a rook or queen.
        let dir = if captured_sq < self.king_sq { 2 } else { 3 };
        let offset = DIRECTION_OFFSETS[dir];
        for n in 0..SQUARES_TO_EDGE[self.king_sq][dir] {
            let sq = (self.king_sq as i32 + offset * (n as i32 + 1)) as usize;
            let piece = self.board.square[sq];
            if piece.is_none() {
                continue;
            }
            if piece.is_color(self.opponent)
                && (piece.is_kind(Piece::Rook) || piece.is_kind(Piece::Queen))
            {
                return true;
            }
            break;
        }

        // The capturing pawn left its square; an opponent pawn may now be
        // touching the king diagonally.
        let opponent_pawn = ColoredPiece::new(self.opponent, Piece::Pawn);
        for &dir in &PAWN_ATTACK_DIRS[self.us] {
            if SQUARES_TO_EDGE[self.king_sq][dir] > 0 {
                let sq = (self.king_sq as i32 + DIRECTION_OFFSETS[dir]) as usize;
                if self.board.square[sq] == opponent_pawn {
                    return true;
                }
            }
        }

        false
    }
}
