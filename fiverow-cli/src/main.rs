//! fiverow CLI - command-line front end for the move engine
//!
//! Commands:
//! - move: answer a JSON move request
//! - play: engine self-play
//! - eval: static evaluation of a position

mod engine_args;
mod eval_cmd;
mod move_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fiverow")]
#[command(about = "Five-in-a-row move engine")]
struct Cli {
    /// Seed for the engine's random fallback
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a move for a board read as JSON
    Move(move_cmd::MoveArgs),
    /// Let the engine play itself
    Play(play_cmd::PlayArgs),
    /// Print the static evaluation of a board
    Eval(eval_cmd::EvalArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Move(args) => move_cmd::run(args, cli.seed),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Eval(args) => eval_cmd::run(args),
    }
}
