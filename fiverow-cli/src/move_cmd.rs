//! Move command - answer a single move request
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_request(), decide(), report()
//! - Level 3: read_input()
//! - Level 4: EngineArgs (shared configuration)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fiverow_core::{AlphaBetaAI, Move, MoveRequest, MoveResponse, SearchReport};

use crate::engine_args::EngineArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MoveArgs {
    /// Move request JSON file, or `-` for stdin
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub input: PathBuf,

    /// Include per-candidate scores and search statistics in the output
    #[arg(long)]
    pub report: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Response with the full root report attached
#[derive(Serialize)]
struct DetailedResponse {
    #[serde(rename = "move")]
    mv: Option<Move>,
    report: Option<SearchReport>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run move command
///
/// 1. Load and validate the request
/// 2. Search for the move
/// 3. Print the response as JSON
pub fn run(args: MoveArgs, seed: Option<u64>) -> Result<()> {
    let request = load_request(&args.input)?;
    let mut ai = args.engine.build_ai(seed)?;

    tracing::info!(
        "Move request: {}x{} board, engine plays {} (depth={}, time={}s)",
        request.size,
        request.size,
        request.player,
        ai.config().max_depth,
        ai.config().time_limit_secs
    );

    let output = if args.report {
        let (mv, report) = decide_with_report(&mut ai, &request)?;
        serde_json::to_string_pretty(&DetailedResponse { mv, report })?
    } else {
        let mv = ai.choose_move(&request)?;
        serde_json::to_string(&MoveResponse { mv })?
    };

    println!("{}", output);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a request from a file or stdin
pub fn load_request(input: &Path) -> Result<MoveRequest> {
    let text = read_input(input)?;
    MoveRequest::from_json(&text).with_context(|| format!("in {}", input.display()))
}

/// Search and keep the report; the chosen move still goes through
/// `best_move` so the random fallback applies.
fn decide_with_report(
    ai: &mut AlphaBetaAI,
    request: &MoveRequest,
) -> Result<(Option<Move>, Option<SearchReport>)> {
    let mut board = request.to_board()?;
    if board.is_full() {
        return Ok((None, None));
    }

    let report = ai.search_root(&mut board, request.player);
    let mv = match report.best_move {
        Some(mv) => Some(mv),
        None => ai.best_move(&board, request.player),
    };
    Ok((mv, Some(report)))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading request from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
