use std::collections::BTreeMap;

use chess_core::board::Board;
use chess_core::perft::{perft, perft_root, PerftConfig};

const POSITIONS: &[(&str, u32, u64)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 4, 197_281),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
        97_862,
    ),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4, 43_238),
    (
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        3,
        9467,
    ),
    (
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        3,
        62_379,
    ),
];

#[test]
fn perft_reference_counts() {
    for &(fen, depth, expected) in POSITIONS {
        let mut board = Board::from_fen(fen);
        assert_eq!(
            perft(&mut board, depth, true),
            expected,
            "perft mismatch for '{fen}' at depth {depth}"
        );
    }
}

#[test]
fn parallel_perft_matches_serial() {
    for &(fen, depth, expected) in POSITIONS {
        let board = Board::from_fen(fen);

        let serial = perft_root(&board, depth, &PerftConfig::default()).unwrap();
        let parallel = perft_root(
            &board,
            depth,
            &PerftConfig {
                threads: 4,
                ..PerftConfig::default()
            },
        )
        .unwrap();

        assert_eq!(serial.nodes, expected);
        assert_eq!(parallel.nodes, expected, "parallel total differs for '{fen}'");

        // The split sets must agree move by move, ignoring completion order.
        let serial_set: BTreeMap<String, u64> = serial
            .root_counts
            .iter()
            .map(|(mv, n)| (mv.to_string(), *n))
            .collect();
        let parallel_set: BTreeMap<String, u64> = parallel
            .root_counts
            .iter()
            .map(|(mv, n)| (mv.to_string(), *n))
            .collect();
        assert_eq!(serial_set, parallel_set, "split sets differ for '{fen}'");
    }
}

#[test]
fn more_workers_than_root_moves_is_fine() {
    // Position 4 has only six root moves.
    let board = Board::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    let summary = perft_root(
        &board,
        2,
        &PerftConfig {
            threads: 64,
            ..PerftConfig::default()
        },
    )
    .unwrap();
    assert_eq!(summary.nodes, 264);
    assert_eq!(summary.root_counts.len(), 6);
}

#[test]
fn no_bulk_matches_bulk_through_the_driver() {
    let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let bulk = perft_root(&board, 3, &PerftConfig::default()).unwrap();
    let no_bulk = perft_root(
        &board,
        3,
        &PerftConfig {
            bulk_count: false,
            ..PerftConfig::default()
        },
    )
    .unwrap();
    assert_eq!(bulk.nodes, no_bulk.nodes);
}

#[test]
fn driver_leaves_the_caller_board_untouched() {
    let board = Board::new();
    let before_fen = board.to_fen();
    let before_hash = board.hash();
    perft_root(&board, 3, &PerftConfig::default()).unwrap();
    assert_eq!(board.to_fen(), before_fen);
    assert_eq!(board.hash(), before_hash);
}

#[test]
fn checkmate_root_has_no_nodes() {
    let board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let summary = perft_root(&board, 3, &PerftConfig::default()).unwrap();
    assert_eq!(summary.nodes, 0);
    assert!(summary.root_counts.is_empty());
}

#[test]
fn random_walks_stay_structurally_consistent() {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(7);
    for &(fen, _, _) in POSITIONS {
        let mut board = Board::from_fen(fen);
        for _ in 0..30 {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.make_move(mv);
            board.validate();
            assert_eq!(board.hash(), board.calculate_hash());
        }
    }
}
