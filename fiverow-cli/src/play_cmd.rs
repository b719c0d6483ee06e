//! Play command - engine self-play on an empty board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: report_results()
//! - Level 3: print_json_results(), print_text_results()
//! - Level 4: describe_result()

use anyhow::Result;
use clap::Args;

use fiverow_core::{Board, GameRecord, GameResult, Player};

use crate::engine_args::EngineArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (at least 5)
    #[arg(long, default_value = "9")]
    pub size: usize,

    /// Side that moves first
    #[arg(long, default_value = "x", value_parser = parse_player)]
    pub first: Player,

    /// Output the game as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

fn parse_player(s: &str) -> Result<Player, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Player::try_from(c).map_err(|e| e.to_string()),
        _ => Err(format!("expected a single marker, got {:?}", s)),
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the engine and an empty board
/// 2. Let the engine play both sides to the end
/// 3. Report the game
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut ai = args.engine.build_ai(seed)?;
    let board = Board::new(args.size)?;

    tracing::info!(
        "Self-play on {}x{} board, {} first (depth={}, time={}s)",
        args.size,
        args.size,
        args.first,
        ai.config().max_depth,
        ai.config().time_limit_secs
    );

    let record = ai.play_game(board, args.first);

    tracing::info!("Game over after {} moves: {}", record.moves.len(), describe_result(record.result));

    report_results(&record, &args);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_results(record: &GameRecord, args: &PlayArgs) {
    if args.json {
        print_json_results(record);
    } else {
        print_text_results(record);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_json_results(record: &GameRecord) {
    #[derive(serde::Serialize)]
    struct JsonMove {
        player: Player,
        row: usize,
        col: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        result: GameResult,
        moves: Vec<JsonMove>,
        board: Vec<String>,
    }

    let output = JsonOutput {
        result: record.result,
        moves: record
            .moves
            .iter()
            .map(|&(player, mv)| JsonMove {
                player,
                row: mv.row,
                col: mv.col,
            })
            .collect(),
        board: record.board.render().lines().map(str::to_string).collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(record: &GameRecord) {
    println!("\n=== Game ===");
    for (i, (player, mv)) in record.moves.iter().enumerate() {
        println!("{:>3}. {} {}", i + 1, player, mv);
    }
    println!("\n{}", record.board);
    println!("Result: {}", describe_result(record.result));
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Won(p) => format!("{} wins", p),
        GameResult::Draw => "draw".to_string(),
        GameResult::Ongoing => "unfinished".to_string(),
    }
}
