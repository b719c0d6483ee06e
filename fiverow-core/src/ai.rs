//! CPU-based Alpha-Beta AI

use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::{Board, Move, Player};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::eval::evaluate;
use crate::request::MoveRequest;
use crate::rules::{self, GameResult};
use crate::search::{Search, SearchStats};

// ============================================================================
// SEARCH REPORT
// ============================================================================

/// Score of one root candidate, from the mover's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveScore {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: i32,
}

/// Result of searching every root candidate
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    /// Candidate with the strictly greatest score, earliest on ties
    pub best_move: Option<Move>,
    pub best_score: Option<i32>,
    /// Root candidates in row-major order
    pub scores: Vec<MoveScore>,
    pub stats: SearchStats,
}

impl SearchReport {
    fn from_scores(scores: Vec<MoveScore>, stats: SearchStats) -> Self {
        let mut best: Option<MoveScore> = None;
        for candidate in &scores {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(*candidate);
            }
        }

        Self {
            best_move: best.map(|b| b.mv),
            best_score: best.map(|b| b.score),
            scores,
            stats,
        }
    }
}

/// A finished self-play game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub board: Board,
    pub moves: Vec<(Player, Move)>,
    pub result: GameResult,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaAI {
    config: SearchConfig,
    rng: ChaCha8Rng,
}

impl AlphaBetaAI {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_seed(config, 42)
    }

    pub fn with_seed(config: SearchConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search every empty square for `player` and score it.
    ///
    /// Each candidate is placed, the opponent's reply is searched to
    /// `max_depth` plies, and the stone is retracted. `board` is identical
    /// to its input when this returns.
    pub fn search_root(&self, board: &mut Board, player: Player) -> SearchReport {
        let started = Instant::now();
        let deadline = started + self.config.time_budget();
        let moves = board.available_moves();

        let (scores, stats) = score_candidates(board, &moves, player, &self.config, started, deadline);
        let report = SearchReport::from_scores(scores, stats);

        tracing::debug!(
            "searched {} candidates for {}: best={:?} score={:?} nodes={} cache_hits={} cache_flushes={} {}ms{}",
            moves.len(),
            player,
            report.best_move,
            report.best_score,
            report.stats.nodes,
            report.stats.cache_hits,
            report.stats.cache_flushes,
            report.stats.elapsed.as_millis(),
            if report.stats.timed_out { " (time limit hit)" } else { "" }
        );

        report
    }

    /// Get best move for `player`, or `None` when the board is full.
    ///
    /// If the search somehow yields nothing while squares are free, a
    /// uniformly random free square is returned instead.
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let moves = board.available_moves();
        if moves.is_empty() {
            return None;
        }
        if moves.len() == 1 {
            return Some(moves[0]);
        }

        let mut scratch = board.clone();
        let report = self.search_root(&mut scratch, player);
        match report.best_move {
            Some(mv) => Some(mv),
            None => {
                tracing::warn!("search produced no move with {} free squares, picking at random", moves.len());
                moves.choose(&mut self.rng).copied()
            }
        }
    }

    /// Validate a request and answer it
    pub fn choose_move(&mut self, request: &MoveRequest) -> Result<Option<Move>> {
        let board = request.to_board()?;
        Ok(self.best_move(&board, request.player))
    }

    /// Play both sides from `initial` until someone wins or the board fills
    pub fn play_game(&mut self, initial: Board, first: Player) -> GameRecord {
        let mut board = initial;
        let mut to_move = first;
        let mut moves = Vec::new();

        while rules::result(&board) == GameResult::Ongoing {
            let Some(mv) = self.best_move(&board, to_move) else {
                break;
            };
            // best_move only returns free squares
            if board.place(mv, to_move).is_err() {
                break;
            }
            tracing::info!("{} plays {}", to_move, mv);
            moves.push((to_move, mv));
            to_move = to_move.opponent();
        }

        GameRecord {
            result: rules::result(&board),
            board,
            moves,
        }
    }

    /// Static evaluation of a position for `player`
    pub fn evaluate(&self, board: &Board, player: Player) -> i32 {
        evaluate(board, player)
    }
}

// ============================================================================
// ROOT CANDIDATES
// ============================================================================

/// Score candidates in order with one search (and one cache) for all of them
#[cfg(not(feature = "parallel"))]
fn score_candidates(
    board: &mut Board,
    moves: &[Move],
    player: Player,
    config: &SearchConfig,
    started: Instant,
    deadline: Instant,
) -> (Vec<MoveScore>, SearchStats) {
    let mut search = Search::new(player, config, deadline);
    let scores = moves
        .iter()
        .map(|&mv| {
            let mut placed = board.place_scoped(mv, player);
            let score = search.minimax(&mut placed, config.max_depth, false, i32::MIN, i32::MAX);
            tracing::trace!("candidate {} scored {}", mv, score);
            MoveScore { mv, score }
        })
        .collect();
    (scores, search.finish(started))
}

/// Score candidates across rayon workers. Every candidate gets its own board
/// copy and cache; they share only the deadline.
#[cfg(feature = "parallel")]
fn score_candidates(
    board: &mut Board,
    moves: &[Move],
    player: Player,
    config: &SearchConfig,
    started: Instant,
    deadline: Instant,
) -> (Vec<MoveScore>, SearchStats) {
    use rayon::prelude::*;

    let root: &Board = board;
    let results: Vec<(MoveScore, SearchStats)> = moves
        .par_iter()
        .map(|&mv| {
            let mut local = root.clone();
            let mut search = Search::new(player, config, deadline);
            let score = {
                let mut placed = local.place_scoped(mv, player);
                search.minimax(&mut placed, config.max_depth, false, i32::MIN, i32::MAX)
            };
            tracing::trace!("candidate {} scored {}", mv, score);
            (MoveScore { mv, score }, search.finish(started))
        })
        .collect();

    let mut stats = SearchStats::default();
    let scores = results
        .into_iter()
        .map(|(score, s)| {
            stats.merge(&s);
            score
        })
        .collect();
    (scores, stats)
}

// ============================================================================
// TESTS
// ============================================================================
