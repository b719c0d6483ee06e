//! fiverow core - move engine for five-in-a-row on an N x N board
//!
//! This crate provides:
//! - Board model with scoped (self-retracting) stone placement
//! - Five-in-a-row detection on rows, columns and diagonals
//! - Motif-table line scoring and whole-board evaluation
//! - Time- and depth-bounded alpha-beta search with a transposition table
//! - Move selection with a random fallback, and request validation

pub mod board;
pub mod rules;
pub mod patterns;
pub mod eval;
pub mod tt;
pub mod search;
pub mod ai;
pub mod config;
pub mod request;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Move, Player, Placed, MIN_BOARD_SIZE, WIN_LENGTH};
pub use rules::{is_winner, winner, GameResult};
pub use patterns::{Motif, Sym, MOTIFS};
pub use eval::{evaluate, evaluate_line, is_decided, WIN_VALUE};
pub use tt::{Bound, TranspositionTable};
pub use search::{Search, SearchStats};
pub use ai::{AlphaBetaAI, GameRecord, MoveScore, SearchReport};
pub use config::SearchConfig;
pub use request::{MoveRequest, MoveResponse};
pub use error::EngineError;
