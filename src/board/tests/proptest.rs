//! Property-based tests using proptest.

use proptest::prelude::*;

use crate::board::{Board, Move, UnmakeInfo};
use crate::perft::perft;

/// Strategy for the length of a random legal move sequence.
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy for a move-selection seed.
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn random_walk(board: &mut Board, seed: u64, num_moves: usize) -> Vec<(Move, UnmakeInfo)> {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = Vec::new();
    for _ in 0..num_moves {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let info = board.make_move(mv);
        history.push((mv, info));
    }
    history
}

proptest! {
    /// make_move followed by unmake_move restores the position exactly,
    /// including counters, hash and history.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial = board.clone();

        let mut history = random_walk(&mut board, seed, num_moves);
        while let Some((mv, info)) = history.pop() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(board, initial);
    }

    /// The incrementally maintained hash always equals the recomputed one.
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        use rand::prelude::*;

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv);

            prop_assert_eq!(board.hash(), board.calculate_hash());
        }
    }

    /// Every reachable position passes the structural cross-check.
    #[test]
    fn prop_reachable_positions_are_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves);
        board.validate();
    }

    /// Generated moves never leave the mover's own king in check.
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy()) {
        use rand::prelude::*;

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let mover = board.side_to_move();
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }

            for &mv in &moves {
                let info = board.make_move(mv);
                prop_assert!(
                    !board.is_square_attacked(board.king_square(mover), mover.opponent()),
                    "legal move left king in check: {:?}", mv
                );
                board.unmake_move(mv, info);
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv);
        }
    }

    /// FEN round-trip preserves the position.
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen);

        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(restored.hash(), board.hash());
        prop_assert_eq!(restored.castling_rights(), board.castling_rights());
        prop_assert_eq!(restored.ep_file(), board.ep_file());
        prop_assert_eq!(restored.white_to_move(), board.white_to_move());
    }

    /// Bulk counting never changes a perft total.
    #[test]
    fn prop_bulk_count_equivalence(seed in seed_strategy(), num_moves in 0..12usize) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves);

        let bulk = perft(&mut board, 2, true);
        let no_bulk = perft(&mut board, 2, false);
        prop_assert_eq!(bulk, no_bulk);
    }

    /// UCI strings of legal moves parse back to the same move.
    #[test]
    fn prop_uci_round_trip(seed in seed_strategy(), num_moves in 0..20usize) {
        let mut board = Board::new();
        random_walk(&mut board, seed, num_moves);

        for &mv in &board.generate_moves() {
            let parsed = board.parse_move(&mv.to_string()).unwrap();
            prop_assert_eq!(parsed, mv);
        }
    }
}
