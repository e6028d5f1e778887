//! Perft command-line driver.
//!
//! Usage: `perft [depth] [split [depth]] [--threads N] [--only <move>]
//! [--no-bulk] [<fen>...]`
//!
//! The FEN may span several arguments; it runs to the next `--` flag or the
//! end of the command line. Defaults: depth 4, single-threaded, bulk
//! counting on, standard initial position.

use std::env;
use std::process;
use std::time::Instant;

use chess_core::board::Board;
use chess_core::perft::{perft_root, PerftConfig};
use chess_core::sync::StopFlag;

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_depth(s: &str) -> u32 {
    let depth: u32 = s.parse().unwrap_or(1);
    if depth < 1 {
        log::warn!("depth {depth} clamped to 1");
        return 1;
    }
    depth
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut max_depth: u32 = 4;
    let mut split_mode = false;
    let mut threads: usize = 0;
    let mut bulk_count = true;
    let mut only: Option<String> = None;
    let mut fen = Board::START_FEN.to_string();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "split" {
            split_mode = true;
            if i + 1 < args.len() && is_number(&args[i + 1]) {
                i += 1;
                max_depth = parse_depth(&args[i]);
            }
        } else if arg == "--threads" || arg == "-t" {
            if i + 1 < args.len() && is_number(&args[i + 1]) {
                i += 1;
                threads = args[i].parse().unwrap_or(1).max(1);
            }
        } else if arg == "--only" {
            if i + 1 < args.len() {
                i += 1;
                only = Some(args[i].clone());
            }
        } else if arg == "--no-bulk" {
            bulk_count = false;
        } else if is_number(arg) {
            max_depth = parse_depth(arg);
        } else if !arg.starts_with("--") {
            // A FEN, possibly spread over several arguments.
            let mut parts = vec![arg.clone()];
            while i + 1 < args.len() && !args[i + 1].starts_with("--") {
                i += 1;
                parts.push(args[i].clone());
            }
            fen = parts.join(" ");
        } else {
            eprintln!("Ignoring unknown flag '{arg}'");
        }
        i += 1;
    }

    let board = match Board::try_from_fen(&fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Failed to parse FEN '{fen}': {err}");
            process::exit(1);
        }
    };

    println!("FEN: {fen}");
    if threads > 0 {
        println!("Using {threads} threads");
    }
    if let Some(mv) = &only {
        println!("Filtering for move: {mv}");
    }
    println!();

    if split_mode {
        let config = PerftConfig {
            bulk_count,
            threads: threads.max(1),
            only,
            split_output: true,
            stop: StopFlag::new(),
        };
        let start = Instant::now();
        match perft_root(&board, max_depth, &config) {
            Ok(summary) => {
                let ms = start.elapsed().as_millis();
                println!();
                println!("Split completed in {ms} milliseconds");
                println!("Nodes searched: {}", summary.nodes);
            }
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
    } else {
        for depth in 1..=max_depth {
            // Thread startup outweighs the work at shallow depths.
            let depth_threads = if depth >= 4 { threads.max(1) } else { 1 };
            let config = PerftConfig {
                bulk_count,
                threads: depth_threads,
                only: only.clone(),
                split_output: false,
                stop: StopFlag::new(),
            };
            let start = Instant::now();
            match perft_root(&board, depth, &config) {
                Ok(summary) => {
                    let ms = start.elapsed().as_millis();
                    println!(
                        "Depth: {depth} ply  Result: {} positions  Time: {ms} milliseconds",
                        summary.nodes
                    );
                }
                Err(err) => {
                    eprintln!("{err}");
                    process::exit(1);
                }
            }
        }
    }
}
