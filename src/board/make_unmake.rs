//! Reversible move execution.
//!
//! `make_move` applies a legal move and returns the scalar snapshot needed
//! to reverse it; `unmake_move` restores the previous position exactly. Both
//! maintain the square map, piece lists, king squares, castling rights,
//! en-passant file, Zobrist key and counters incrementally, and neither
//! touches the heap beyond the repetition history vector.

use crate::zobrist::ZOBRIST;

use super::types::{
    castle_bits, clear_ep_file, ep_file, set_ep_file, ColoredPiece, Move, Piece,
    CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q, CASTLING_MASK,
};
use super::{Board, UnmakeInfo};

#[inline]
fn piece_key(piece: Piece, color_idx: usize, sq: usize) -> u64 {
    ZOBRIST.piece_keys[piece.index()][color_idx][sq]
}

/// Rook relocation squares for a castling move of the given color.
#[inline]
fn castling_rook_squares(king_from: usize, king_to: usize, color_idx: usize) -> (usize, usize) {
    if king_to > king_from {
        if color_idx == 0 {
            (7, 5)
        } else {
            (63, 61)
        }
    } else if color_idx == 0 {
        (0, 3)
    } else {
        (56, 59)
    }
}

impl Board {
    /// Apply a legal move, returning the undo record for `unmake_move`.
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let mut undo = UnmakeInfo {
            game_state: self.game_state,
            zobrist_key: self.zobrist_key,
            fifty_move_counter: self.fifty_move_counter,
            ply_count: self.ply_count,
            captured_piece: None,
        };

        let from = mv.from().index();
        let to = mv.to().index();
        let mover = self.square[from];
        let mover_kind = mover.kind().expect("make_move: no piece on from-square");
        let us_color = self.side_to_move();
        let us = us_color.index();
        let them = 1 - us;
        debug_assert!(mover.is_color(us_color), "make_move: moving opponent piece");

        // A normal capture removes the to-square piece; the en-passant
        // victim sits behind the target and is handled with the flag below.
        let captured = self.square[to].kind();
        if let Some(cap) = captured {
            self.piece_list_mut(cap, them).remove(to);
            self.zobrist_key ^= piece_key(cap, them, to);
        }
        undo.captured_piece = if mv.is_en_passant() {
            Some(Piece::Pawn)
        } else {
            captured
        };

        if let Some(file) = ep_file(self.game_state) {
            self.zobrist_key ^= ZOBRIST.en_passant[file];
        }
        self.game_state = clear_ep_file(self.game_state);

        self.zobrist_key ^= piece_key(mover_kind, us, from);
        if mover_kind == Piece::King {
            self.king_square[us] = mv.to();
        } else {
            self.piece_list_mut(mover_kind, us).relocate(from, to);
        }

        let mut landing = mover;
        if let Some(promo) = mv.promotion_piece() {
            // The pawn never lands as a pawn: swap it for the promoted piece
            // at the destination and hash only the promoted piece in.
            self.pawns[us].remove(to);
            self.piece_list_mut(promo, us).add(to);
            landing = ColoredPiece::new(us_color, promo);
            self.zobrist_key ^= piece_key(promo, us, to);
        } else if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(from, to, us);
            debug_assert!(self.square[rook_from].is_kind(Piece::Rook));
            self.square[rook_to] = self.square[rook_from];
            self.square[rook_from] = ColoredPiece::NONE;
            self.rooks[us].relocate(rook_from, rook_to);
            self.zobrist_key ^=
                piece_key(Piece::Rook, us, rook_from) ^ piece_key(Piece::Rook, us, rook_to);
        } else if mv.is_en_passant() {
            let captured_sq = if us == 0 { to - 8 } else { to + 8 };
            self.square[captured_sq] = ColoredPiece::NONE;
            self.pawns[them].remove(captured_sq);
            self.zobrist_key ^= piece_key(Piece::Pawn, them, captured_sq);
        }

        if !mv.is_promotion() {
            self.zobrist_key ^= piece_key(mover_kind, us, to);
        }
        self.square[to] = landing;
        self.square[from] = ColoredPiece::NONE;

        if mv.is_pawn_two_forward() {
            let file = from & 7;
            self.game_state = set_ep_file(self.game_state, file);
            self.zobrist_key ^= ZOBRIST.en_passant[file];
        }

        let old_rights = self.game_state & CASTLING_MASK;
        if mover_kind == Piece::King {
            self.game_state &= !castle_bits(us_color);
        }
        // A piece leaving or landing on a corner square invalidates that
        // corner's right, whether it is the rook moving or being captured.
        for sq in [from, to] {
            match sq {
                0 => self.game_state &= !CASTLE_WHITE_Q,
                7 => self.game_state &= !CASTLE_WHITE_K,
                56 => self.game_state &= !CASTLE_BLACK_Q,
                63 => self.game_state &= !CASTLE_BLACK_K,
                _ => {}
            }
        }
        let new_rights = self.game_state & CASTLING_MASK;
        if old_rights != new_rights {
            self.zobrist_key ^=
                ZOBRIST.castling[old_rights as usize] ^ ZOBRIST.castling[new_rights as usize];
        }

        self.white_to_move = !self.white_to_move;
        self.zobrist_key ^= ZOBRIST.black_to_move;

        self.ply_count += 1;
        if mover_kind == Piece::Pawn || undo.captured_piece.is_some() {
            self.fifty_move_counter = 0;
            self.zobrist_history.clear();
        } else {
            self.fifty_move_counter += 1;
            self.zobrist_history.push(self.zobrist_key);
        }

        undo
    }

    /// Reverse a move made by `make_move` with its undo record.
    pub fn unmake_move(&mut self, mv: Move, undo: UnmakeInfo) {
        self.white_to_move = !self.white_to_move;
        let us_color = self.side_to_move();
        let us = us_color.index();
        let them = 1 - us;
        let them_color = us_color.opponent();

        let from = mv.from().index();
        let to = mv.to().index();

        let mut moved = self.square[to];
        let mut moved_kind = moved.kind().expect("unmake_move: no piece on to-square");

        if mv.is_promotion() {
            self.piece_list_mut(moved_kind, us).remove(to);
            self.pawns[us].add(from);
            moved = ColoredPiece::new(us_color, Piece::Pawn);
            moved_kind = Piece::Pawn;
        } else if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(from, to, us);
            self.square[rook_from] = self.square[rook_to];
            self.square[rook_to] = ColoredPiece::NONE;
            self.rooks[us].relocate(rook_to, rook_from);
        } else if mv.is_en_passant() {
            let captured_sq = if us == 0 { to - 8 } else { to + 8 };
            self.square[captured_sq] = ColoredPiece::new(them_color, Piece::Pawn);
            self.pawns[them].add(captured_sq);
        }

        self.square[from] = moved;
        self.square[to] = ColoredPiece::NONE;

        if moved_kind == Piece::King {
            self.king_square[us] = mv.from();
        } else if !mv.is_promotion() {
            self.piece_list_mut(moved_kind, us).relocate(to, from);
        }

        if let Some(cap) = undo.captured_piece {
            if !mv.is_en_passant() {
                self.square[to] = ColoredPiece::new(them_color, cap);
                self.piece_list_mut(cap, them).add(to);
            }
        }

        self.game_state = undo.game_state;
        self.zobrist_key = undo.zobrist_key;
        self.fifty_move_counter = undo.fifty_move_counter;
        self.ply_count = undo.ply_count;
        self.zobrist_history.pop();
    }
}
