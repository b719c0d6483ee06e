//! Eval command - static evaluation of a request's board

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use fiverow_core::{evaluate, is_decided, winner};

use crate::move_cmd::load_request;

#[derive(Args)]
pub struct EvalArgs {
    /// Move request JSON file, or `-` for stdin
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub input: PathBuf,
}

pub fn run(args: EvalArgs) -> Result<()> {
    let request = load_request(&args.input)?;
    let board = request.to_board()?;
    let score = evaluate(&board, request.player);

    print!("{}", board);
    println!("score for {}: {}", request.player, score);
    if is_decided(score) {
        if let Some(p) = winner(&board) {
            println!("{} has five in a row", p);
        }
    }
    Ok(())
}
