//! Perft: exhaustive legal-move tree counting.
//!
//! `perft` is the plain recursive counter with a depth-1 bulk-count fast
//! path. `perft_root` enumerates the root moves once and counts each
//! subtree, either serially or across a pool of worker threads that each
//! own a clone of the root position. Per-root results feed split-mode
//! output and mismatch localization against reference engines.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;

use log::debug;
use parking_lot::Mutex;

use crate::board::{Board, Move, MoveList};
use crate::sync::StopFlag;

/// Configuration for a root perft run.
#[derive(Clone, Debug)]
pub struct PerftConfig {
    /// Return the move-list length at depth 1 instead of making each move.
    pub bulk_count: bool,
    /// Worker count; 0 or 1 runs serially. Effective workers never exceed
    /// the number of root moves.
    pub threads: usize,
    /// Restrict the root to moves matching this UCI string.
    pub only: Option<String>,
    /// Print `<uci>: <count>` for each root move as it completes.
    pub split_output: bool,
    /// Cooperative cancellation, observed between root moves.
    pub stop: StopFlag,
}

impl Default for PerftConfig {
    fn default() -> Self {
        PerftConfig {
            bulk_count: true,
            threads: 1,
            only: None,
            split_output: false,
            stop: StopFlag::new(),
        }
    }
}

/// Result of a root perft run.
#[derive(Clone, Debug)]
pub struct PerftSummary {
    /// Total leaf count over all (possibly filtered) root moves.
    pub nodes: u64,
    /// Per-root-move subtree sizes. Order is unspecified in parallel runs;
    /// the multiset is deterministic.
    pub root_counts: Vec<(Move, u64)>,
}

/// Error type for parallel perft failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerftError {
    /// One or more workers panicked; the rest were joined before reporting.
    WorkerPanicked { workers: usize },
}

impl fmt::Display for PerftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerftError::WorkerPanicked { workers } => {
                write!(f, "{workers} perft worker(s) panicked")
            }
        }
    }
}

impl std::error::Error for PerftError {}

/// Count leaf nodes of the legal move tree to `depth`.
///
/// One move buffer lives on the stack per recursion level; make/unmake do
/// not allocate.
#[must_use]
pub fn perft(board: &mut Board, depth: u32, bulk_count: bool) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    board.generate_moves_into(&mut moves);

    // perft(p, 1) is just the number of legal moves.
    if depth == 1 && bulk_count {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in &moves {
        let undo = board.make_move(mv);
        nodes += perft(board, depth - 1, bulk_count);
        board.unmake_move(mv, undo);
    }
    nodes
}

fn subtree_count(board: &mut Board, mv: Move, depth: u32, bulk_count: bool) -> u64 {
    let undo = board.make_move(mv);
    let nodes = perft(board, depth - 1, bulk_count);
    board.unmake_move(mv, undo);
    nodes
}

/// Run perft from the root, splitting the count per root move.
///
/// With `config.threads > 1` the root moves are distributed over scoped
/// workers, each recursing on its own clone of `board`; totals are
/// accumulated atomically and equal the serial result.
pub fn perft_root(
    board: &Board,
    depth: u32,
    config: &PerftConfig,
) -> Result<PerftSummary, PerftError> {
    let depth = depth.max(1);

    let mut root = board.clone();
    let mut moves = MoveList::new();
    root.generate_moves_into(&mut moves);

    let root_moves: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|mv| {
            config
                .only
                .as_deref()
                .map_or(true, |uci| mv.to_string() == uci)
        })
        .collect();

    if root_moves.is_empty() {
        return Ok(PerftSummary {
            nodes: 0,
            root_counts: Vec::new(),
        });
    }

    let workers = config.threads.clamp(1, root_moves.len());
    if workers <= 1 {
        return Ok(perft_root_serial(&mut root, depth, config, &root_moves));
    }

    debug!(
        "perft depth {depth}: {} root moves across {workers} workers",
        root_moves.len()
    );

    let total = AtomicU64::new(0);
    let next = AtomicUsize::new(0);
    let root_counts: Mutex<Vec<(Move, u64)>> = Mutex::new(Vec::with_capacity(root_moves.len()));
    let stdout_lock: Mutex<()> = Mutex::new(());

    let mut panicked = 0usize;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut local = board.clone();
                    loop {
                        if config.stop.is_stopped() {
                            break;
                        }
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= root_moves.len() {
                            break;
                        }
                        let mv = root_moves[i];
                        let nodes = subtree_count(&mut local, mv, depth, config.bulk_count);
                        if config.split_output {
                            let _guard = stdout_lock.lock();
                            println!("{mv}: {nodes}");
                        }
                        root_counts.lock().push((mv, nodes));
                        total.fetch_add(nodes, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
    });

    if panicked > 0 {
        return Err(PerftError::WorkerPanicked { workers: panicked });
    }

    Ok(PerftSummary {
        nodes: total.into_inner(),
        root_counts: root_counts.into_inner(),
    })
}

fn perft_root_serial(
    board: &mut Board,
    depth: u32,
    config: &PerftConfig,
    root_moves: &[Move],
) -> PerftSummary {
    let mut root_counts = Vec::with_capacity(root_moves.len());
    let mut nodes = 0;

    for &mv in root_moves {
        if config.stop.is_stopped() {
            break;
        }
        let count = subtree_count(board, mv, depth, config.bulk_count);
        if config.split_output {
            println!("{mv}: {count}");
        }
        root_counts.push((mv, count));
        nodes += count;
    }

    PerftSummary { nodes, root_counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_depth_zero_is_one() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 0, true), 1);
        assert_eq!(perft(&mut board, 0, false), 1);
    }

    #[test]
    fn test_perft_root_matches_plain_perft() {
        let board = Board::new();
        let summary = perft_root(&board, 3, &PerftConfig::default()).unwrap();
        assert_eq!(summary.nodes, 8902);
        assert_eq!(summary.root_counts.len(), 20);
        let from_counts: u64 = summary.root_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(from_counts, summary.nodes);
    }

    #[test]
    fn test_perft_root_only_filter() {
        let board = Board::new();
        let config = PerftConfig {
            only: Some("e2e4".to_string()),
            ..PerftConfig::default()
        };
        let summary = perft_root(&board, 2, &config).unwrap();
        assert_eq!(summary.root_counts.len(), 1);
        assert_eq!(summary.root_counts[0].0.to_string(), "e2e4");
        assert_eq!(summary.nodes, 20);
    }

    #[test]
    fn test_perft_root_stopped_before_start_counts_nothing() {
        let board = Board::new();
        let config = PerftConfig::default();
        config.stop.stop();
        let summary = perft_root(&board, 3, &config).unwrap();
        assert_eq!(summary.nodes, 0);
        assert!(summary.root_counts.is_empty());
    }
}
