//! Position evaluation

use crate::board::{Board, Cell, Player, WIN_LENGTH};
use crate::patterns::{score_symbols, Sym};

/// Score of a decided position (effectively infinite)
pub const WIN_VALUE: i32 = 10_000;

/// Heuristic scores stay strictly inside the win sentinels
const MAX_HEURISTIC: i32 = WIN_VALUE - 1;

/// True if `score` is one of the win/loss sentinels
pub fn is_decided(score: i32) -> bool {
    score.abs() == WIN_VALUE
}

/// Score one row, column or diagonal for `player`
pub fn evaluate_line(line: &[Cell], player: Player) -> i32 {
    let syms: Vec<Sym> = line.iter().map(|&c| Sym::classify(c, player)).collect();
    score_symbols(&syms)
}

/// Evaluate `board` from `player`'s perspective.
///
/// A five for `player` returns `WIN_VALUE`, a five for the opponent
/// `-WIN_VALUE`, checked in that order. Otherwise the motif scores of every
/// line long enough to hold a five are summed and clamped below the
/// sentinels, so `is_decided` never fires for an undecided board.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let mut mine_five = false;
    let mut theirs_five = false;
    let mut score = 0i32;
    let mut syms = Vec::with_capacity(board.size());

    board.for_each_line(WIN_LENGTH, |line| {
        syms.clear();
        syms.extend(line.iter().map(|&c| Sym::classify(c, player)));

        mine_five |= has_run(&syms, Sym::Mine);
        theirs_five |= has_run(&syms, Sym::Theirs);
        score = score.saturating_add(score_symbols(&syms));
    });

    if mine_five {
        return WIN_VALUE;
    }
    if theirs_five {
        return -WIN_VALUE;
    }
    score.clamp(-MAX_HEURISTIC, MAX_HEURISTIC)
}

fn has_run(syms: &[Sym], side: Sym) -> bool {
    syms.windows(WIN_LENGTH).any(|w| w.iter().all(|&s| s == side))
}
