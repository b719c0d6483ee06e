//! Errors raised at the engine boundary

use crate::board::MIN_BOARD_SIZE;

/// Rejected caller input.
///
/// Running out of time is not an error; the search degrades to a shallower
/// result and reports it through `SearchStats::timed_out`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("board size {size} is below the minimum of {}", MIN_BOARD_SIZE)]
    BoardTooSmall { size: usize },

    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("declared size {declared} does not match board with {actual} rows")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("invalid marker {0:?} (expected 'x', 'o' or ' ')")]
    InvalidMarker(char),

    #[error("move ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("search depth must be at least 1")]
    InvalidDepth,

    #[error("time limit must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(f64),

    #[error("cache capacity must be non-zero when the cache is enabled")]
    InvalidCacheCapacity,
}

pub type Result<T> = std::result::Result<T, EngineError>;
