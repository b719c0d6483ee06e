//! Alpha-Beta search benchmark
//!
//! Measures:
//! 1. Time to pick a move at increasing depths
//! 2. Effect of the transposition cache on node counts
//! 3. Nodes per second

use std::time::Instant;

use fiverow_core::{AlphaBetaAI, Board, Player, SearchConfig};

// ============================================================================
// TEST POSITIONS
// ============================================================================

/// Sparse opening on a small board
fn position_opening() -> Board {
    Board::parse(
        "......\n\
         ......\n\
         ..xo..\n\
         ..ox..\n\
         ......\n\
         ......",
    )
    .unwrap()
}

/// Crowded midgame with threats on both sides
fn position_midgame() -> Board {
    Board::parse(
        "x.o.x.\n\
         .xo.o.\n\
         ..xo..\n\
         .oox.x\n\
         x..o..\n\
         ..x...",
    )
    .unwrap()
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    position: &'static str,
    config: String,
    time_ms: f64,
    nodes: u64,
    cache_hits: u64,
    timed_out: bool,
}

impl BenchmarkResult {
    fn nodes_per_second(&self) -> f64 {
        if self.time_ms > 0.0 {
            self.nodes as f64 / (self.time_ms / 1000.0)
        } else {
            0.0
        }
    }

    fn to_table_row(&self) -> String {
        format!(
            "| {} | {} | {:.2}ms | {} | {} | {:.0} |{}",
            self.position,
            self.config,
            self.time_ms,
            self.nodes,
            self.cache_hits,
            self.nodes_per_second(),
            if self.timed_out { " (timed out)" } else { "" }
        )
    }
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_search(position: &'static str, board: &Board, config: SearchConfig) -> BenchmarkResult {
    let label = format!(
        "depth={} cache={}",
        config.max_depth,
        if config.use_cache { "on" } else { "off" }
    );
    let ai = AlphaBetaAI::new(config).unwrap();
    let mut scratch = board.clone();

    let start = Instant::now();
    let report = ai.search_root(&mut scratch, Player::X);
    let elapsed = start.elapsed();

    BenchmarkResult {
        position,
        config: label,
        time_ms: elapsed.as_secs_f64() * 1000.0,
        nodes: report.stats.nodes,
        cache_hits: report.stats.cache_hits,
        timed_out: report.stats.timed_out,
    }
}

fn main() {
    println!("Five-in-a-row search benchmark\n");
    println!("| Position | Config | Time | Nodes | Cache hits | Nodes/s |");
    println!("|----------|--------|------|-------|------------|---------|");

    let positions = [
        ("opening", position_opening()),
        ("midgame", position_midgame()),
    ];

    for (name, board) in &positions {
        for depth in 1..=3 {
            for cache in [false, true] {
                let config = SearchConfig::with_depth(depth).time_limit(60.0).cache(cache);
                println!("{}", bench_search(name, board, config).to_table_row());
            }
        }
    }

    println!("\nFixed 1s budget, depth 5:");
    for (name, board) in &positions {
        let config = SearchConfig::with_depth(5).time_limit(1.0);
        println!("{}", bench_search(name, board, config).to_table_row());
    }
}
