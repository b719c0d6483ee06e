//! Depth- and time-bounded minimax with alpha-beta pruning
//!
//! Scores are always from the root player's point of view. The root player's
//! plies maximize, the opponent's plies minimize. Moves are explored in
//! place on the caller's board and retracted by the `Placed` guard, so the
//! board is unchanged whenever a call returns or unwinds.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::board::{Board, Player};
use crate::config::SearchConfig;
use crate::eval::{evaluate, is_decided};
use crate::tt::{Bound, TranspositionTable};

// ============================================================================
// STATISTICS
// ============================================================================

/// Counters for one top-level search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes entered, including cutoffs
    pub nodes: u64,
    pub cache_hits: u64,
    /// Times the cache filled up and was cleared
    pub cache_flushes: u64,
    /// The deadline passed and some nodes fell back to static evaluation
    pub timed_out: bool,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
        self.cache_flushes += other.cache_flushes;
        self.timed_out |= other.timed_out;
        self.elapsed = self.elapsed.max(other.elapsed);
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

// ============================================================================
// SEARCH
// ============================================================================

/// State for one top-level search: who the root player is, when to stop,
/// and the optional cache owned by this search.
pub struct Search {
    player: Player,
    deadline: Instant,
    cache: Option<TranspositionTable>,
    stats: SearchStats,
}

impl Search {
    pub fn new(player: Player, config: &SearchConfig, deadline: Instant) -> Self {
        let cache = config
            .use_cache
            .then(|| TranspositionTable::new(config.cache_capacity));
        Self {
            player,
            deadline,
            cache,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Minimax value of `board` with `depth` plies left.
    ///
    /// `maximizing` is true when the root player is to move. Cutoffs, in
    /// order: deadline passed, cached result, decided position, no depth
    /// left, board full. The time cutoff is soft: it returns the static
    /// evaluation and lets the recursion unwind normally.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if Instant::now() >= self.deadline {
            self.stats.timed_out = true;
            return evaluate(board, self.player);
        }

        if let Some(score) = self
            .cache
            .as_ref()
            .and_then(|tt| tt.probe(board, depth, alpha, beta))
        {
            self.stats.cache_hits += 1;
            return score;
        }

        let score = evaluate(board, self.player);
        if is_decided(score) || depth == 0 {
            return score;
        }

        let moves = board.available_moves();
        if moves.is_empty() {
            return score;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            let value = {
                let mut placed = board.place_scoped(mv, mover);
                self.minimax(&mut placed, depth - 1, !maximizing, alpha, beta)
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                break;
            }
        }

        // Results under an expired deadline are partly static evaluations
        if !self.stats.timed_out {
            if let Some(tt) = self.cache.as_mut() {
                let bound = if best <= alpha_orig {
                    Bound::Upper
                } else if best >= beta_orig {
                    Bound::Lower
                } else {
                    Bound::Exact
                };
                tt.store(board, depth, best, bound);
            }
        }

        best
    }

    /// Close out the search, stamping the elapsed time
    pub fn finish(mut self, started: Instant) -> SearchStats {
        self.stats.elapsed = started.elapsed();
        self.stats.cache_flushes = self.cache.as_ref().map_or(0, |tt| tt.flushes());
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::WIN_VALUE;

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    fn full_search(board: &mut Board, player: Player, depth: u32, cache: bool) -> (i32, SearchStats) {
        let config = SearchConfig::with_depth(depth).cache(cache);
        let mut search = Search::new(player, &config, far_deadline());
        let score = search.minimax(board, depth, true, i32::MIN, i32::MAX);
        (score, *search.stats())
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut board = Board::parse("x....\n.....\n..o..\n.....\n.....").unwrap();
        let expected = evaluate(&board, Player::X);
        let (score, stats) = full_search(&mut board, Player::X, 0, false);
        assert_eq!(score, expected);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn test_finds_immediate_win() {
        let mut board = Board::parse("xxxx.\n.....\noooo.\n.....\n.....").unwrap();
        let (score, _) = full_search(&mut board, Player::X, 1, false);
        assert_eq!(score, WIN_VALUE);
    }

    #[test]
    fn test_sees_opponent_win() {
        // X to move cannot stop both O fours
        let mut board = Board::parse("oooo.\n.....\n.....\n.....\n.oooo").unwrap();
        let (score, _) = full_search(&mut board, Player::X, 2, false);
        assert_eq!(score, -WIN_VALUE);
    }

    #[test]
    fn test_decided_position_not_expanded() {
        let mut board = Board::parse("ooooo\n.....\n.....\n.....\n.....").unwrap();
        let (score, stats) = full_search(&mut board, Player::X, 3, false);
        assert_eq!(score, -WIN_VALUE);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn test_board_restored() {
        let mut board = Board::parse("x....\n.o...\n..x..\n.....\n.....").unwrap();
        let before = board.clone();
        full_search(&mut board, Player::O, 2, true);
        assert_eq!(board, before);
    }

    #[test]
    fn test_cache_does_not_change_result() {
        // Eight empty squares; transpositions appear from depth 4 on
        let mut board = Board::parse("xo.ox\nox.xo\n..x..\nxo.ox\nox.xo").unwrap();
        let (plain, _) = full_search(&mut board, Player::O, 4, false);
        let (cached, stats) = full_search(&mut board, Player::O, 4, true);
        assert_eq!(plain, cached);
        assert!(stats.cache_hits > 0);
    }

    #[test]
    fn test_small_cache_flushes_are_reported() {
        let mut board = Board::parse("xo.ox\nox.xo\n..x..\nxo.ox\nox.xo").unwrap();
        let (plain, _) = full_search(&mut board, Player::O, 4, false);

        let mut config = SearchConfig::with_depth(4);
        config.cache_capacity = 4;
        let mut search = Search::new(Player::O, &config, far_deadline());
        let score = search.minimax(&mut board, 4, true, i32::MIN, i32::MAX);
        let stats = search.finish(Instant::now());

        assert_eq!(score, plain);
        assert!(stats.cache_flushes > 0);

        let uncached = Search::new(Player::O, &SearchConfig::with_depth(4).cache(false), far_deadline());
        assert_eq!(uncached.finish(Instant::now()).cache_flushes, 0);
    }

    #[test]
    fn test_expired_deadline_returns_static_eval() {
        let mut board = Board::parse("x....\n.....\n..o..\n.....\n.....").unwrap();
        let config = SearchConfig::with_depth(4);
        let mut search = Search::new(Player::X, &config, Instant::now());
        let score = search.minimax(&mut board, 4, true, i32::MIN, i32::MAX);
        assert_eq!(score, evaluate(&board, Player::X));
        assert!(search.stats().timed_out);
        assert_eq!(search.stats().nodes, 1);
    }

    #[test]
    fn test_full_board_is_leaf() {
        let mut board = Board::parse("xxoox\nooxxo\nxxoox\nooxxo\nxxoox").unwrap();
        let (score, stats) = full_search(&mut board, Player::X, 3, false);
        assert_eq!(score, evaluate(&board, Player::X));
        assert_eq!(stats.nodes, 1);
        assert!(board.available_moves().is_empty());
    }
}
