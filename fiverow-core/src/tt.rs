//! Transposition table for caching search results
//!
//! Entries are keyed by the exact board configuration. One table belongs to
//! one top-level search, so the side to move is implied by the position.
//! The table holds at most `capacity` entries; when it fills up it is flushed
//! and refilled.

use rustc_hash::FxHashMap;

use crate::board::{Board, Cell};

/// How a stored score relates to the true minimax value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// True value >= score (failed high)
    Lower,
    /// True value <= score (failed low)
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Remaining depth the score was computed with
    pub depth: u32,
    pub score: i32,
    pub bound: Bound,
}

pub struct TranspositionTable {
    entries: FxHashMap<Box<[Cell]>, CacheEntry>,
    capacity: usize,
    flushes: u64,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            flushes: 0,
        }
    }

    /// Score usable at `depth` inside the `(alpha, beta)` window, if any.
    ///
    /// Entries computed with less remaining depth than required are ignored.
    pub fn probe(&self, board: &Board, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(board.cells())?;
        if entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Record a result. An existing entry is only replaced by one searched
    /// at least as deep.
    pub fn store(&mut self, board: &Board, depth: u32, score: i32, bound: Bound) {
        let entry = CacheEntry { depth, score, bound };

        if let Some(existing) = self.entries.get_mut(board.cells()) {
            if depth >= existing.depth {
                *existing = entry;
            }
            return;
        }

        if self.entries.len() >= self.capacity {
            tracing::debug!(
                "transposition table full ({} entries), flushing",
                self.entries.len()
            );
            self.entries.clear();
            self.flushes += 1;
        }

        self.entries.insert(board.cells().into(), entry);
    }

    pub fn get(&self, board: &Board) -> Option<&CacheEntry> {
        self.entries.get(board.cells())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}
