//! FEN parsing and serialization, plus UCI move resolution.

use std::str::FromStr;

use log::debug;

use super::error::{FenError, MoveParseError};
use super::types::{
    castle_bit, set_ep_file, Color, Move, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::Board;

impl Board {
    /// Parse a position from FEN notation.
    ///
    /// Only the piece placement field is mandatory. Missing trailing fields
    /// fall back to: White to move, no castling rights, no en passant,
    /// half-move clock 0, full-move number 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = *parts.first().ok_or(FenError::Empty)?;

        for (rank_idx, rank_str) in placement.split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::TooManyRanks);
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.set_piece(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        board.validate_kings()?;

        board.white_to_move = match parts.get(1) {
            Some(&"w") | None => true,
            Some(&"b") => false,
            Some(other) => {
                return Err(FenError::InvalidSideToMove {
                    found: (*other).to_string(),
                })
            }
        };

        if let Some(castling) = parts.get(2) {
            for c in castling.chars() {
                match c {
                    'K' => board.game_state |= CASTLE_WHITE_K,
                    'Q' => board.game_state |= CASTLE_WHITE_Q,
                    'k' => board.game_state |= CASTLE_BLACK_K,
                    'q' => board.game_state |= CASTLE_BLACK_Q,
                    '-' => {}
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }

        if let Some(&ep) = parts.get(3) {
            if ep != "-" {
                let sq: Square = ep.parse().map_err(|_| FenError::InvalidEnPassant {
                    found: ep.to_string(),
                })?;
                board.game_state = set_ep_file(board.game_state, sq.file());
            }
        }

        board.fifty_move_counter = parts
            .get(4)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let full_moves: u32 = parts
            .get(5)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1)
            .max(1);
        board.ply_count = (full_moves - 1) * 2 + u32::from(!board.white_to_move);

        board.zobrist_key = board.calculate_hash();
        board.zobrist_history.clear();

        debug!(
            "loaded FEN '{}' ({} to move, key {:#018x})",
            fen,
            board.side_to_move(),
            board.zobrist_key
        );
        Ok(board)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    fn validate_kings(&self) -> Result<(), FenError> {
        for color in [Color::White, Color::Black] {
            let kings = (0..64)
                .filter(|&sq| {
                    self.piece_at(Square::from_index(sq)) == Some((color, Piece::King))
                })
                .count();
            match kings {
                0 => return Err(FenError::MissingKing { color }),
                1 => {}
                _ => return Err(FenError::MultipleKings { color }),
            }
        }
        Ok(())
    }

    /// Serialize the position to six-field FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move { "w" } else { "b" };

        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.game_state & castle_bit(color, kingside) != 0 {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .ep_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.fifty_move_counter,
            self.ply_count / 2 + 1
        )
    }

    /// Resolve a move in UCI long algebraic notation (e.g. "e2e4", "e7e8q")
    /// against the legal moves of the current position.
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let square_at = |range| -> Result<Square, MoveParseError> {
            uci.get(range)
                .and_then(|s: &str| s.parse().ok())
                .ok_or_else(|| MoveParseError::InvalidSquare {
                    notation: uci.to_string(),
                })
        };
        let from = square_at(0..2)?;
        let to = square_at(2..4)?;
        let promotion = match uci.chars().nth(4) {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.generate_moves()
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion_piece() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
