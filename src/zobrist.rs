//! Zobrist hashing keys for chess positions.
//!
//! Keys are drawn from a fixed-seed RNG so that hashes are identical across
//! runs and platforms. This is a contract: the repetition history stored in a
//! position is only meaningful if keys never change between sessions.

use once_cell::sync::Lazy;
use rand::prelude::*;

/// Fixed seed for key generation. Changing this invalidates every stored hash.
const ZOBRIST_SEED: u64 = 846_930_886;

pub(crate) struct ZobristKeys {
    /// piece_keys[piece_type][color][square]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move: u64,
    /// One key per castling-rights nibble (bits 0..3 of the game state).
    pub(crate) castling: [u64; 16],
    /// One key per en-passant file.
    pub(crate) en_passant: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move = rng.gen();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move,
            castling,
            en_passant,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
