//! Win and terminal detection

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Player, WIN_LENGTH};

/// Outcome of a position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Player),
    Draw,
}

/// True if `line` holds `WIN_LENGTH` consecutive stones of `player`
fn line_has_five(line: &[Cell], player: Player) -> bool {
    let target = Cell::Stone(player);
    let mut run = 0;
    for &cell in line {
        if cell == target {
            run += 1;
            if run >= WIN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Does `player` have five in a row on any row, column or diagonal?
///
/// Every axis is scanned with the same sliding window, so on boards wider
/// than five a run anywhere in the line counts.
pub fn is_winner(board: &Board, player: Player) -> bool {
    let mut found = false;
    board.for_each_line(WIN_LENGTH, |line| {
        if !found && line_has_five(line, player) {
            found = true;
        }
    });
    found
}

/// The side holding a five, if any. X is checked first.
pub fn winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&p| is_winner(board, p))
}

pub fn result(board: &Board) -> GameResult {
    match winner(board) {
        Some(p) => GameResult::Won(p),
        None if board.is_full() => GameResult::Draw,
        None => GameResult::Ongoing,
    }
}
