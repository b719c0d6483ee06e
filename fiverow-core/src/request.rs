//! Move requests from the hosting application
//!
//! A request carries the grid, its declared size and the marker the engine
//! plays. Everything is checked here so the search only sees well-formed
//! boards.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};

use crate::board::{Board, Cell, Move, Player};
use crate::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Declared board size; numbers and numeric strings are both accepted
    #[serde(deserialize_with = "size_from_number_or_string")]
    pub size: usize,
    pub board: Vec<Vec<Cell>>,
    /// Side the engine moves for
    pub player: Player,
}

impl MoveRequest {
    pub fn new(board: &Board, player: Player) -> Self {
        let size = board.size();
        Self {
            size,
            board: (0..size).map(|r| board.row(r).to_vec()).collect(),
            player,
        }
    }

    /// Validated board for this request
    pub fn to_board(&self) -> Result<Board> {
        if self.board.len() != self.size {
            return Err(EngineError::SizeMismatch {
                declared: self.size,
                actual: self.board.len(),
            });
        }
        Board::from_rows(&self.board)
    }

    pub fn opponent(&self) -> Player {
        self.player.opponent()
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("malformed move request")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Reply to a move request; `move` is null when the board is full
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub mv: Option<Move>,
}

fn size_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(usize),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(n) => Ok(n),
        Size::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "size": "5",
        "board": [
            ["x", " ", " ", " ", " "],
            [" ", "o", " ", " ", " "],
            [" ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " "],
            [" ", " ", " ", " ", " "]
        ],
        "player": "o"
    }"#;

    #[test]
    fn test_parse_request() {
        let request = MoveRequest::from_json(REQUEST).unwrap();
        assert_eq!(request.size, 5);
        assert_eq!(request.player, Player::O);
        assert_eq!(request.opponent(), Player::X);

        let board = request.to_board().unwrap();
        assert_eq!(board.get(Move::new(1, 1)), Cell::Stone(Player::O));
        assert_eq!(board.stone_count(), 2);
    }

    #[test]
    fn test_size_mismatch() {
        let mut request = MoveRequest::from_json(REQUEST).unwrap();
        request.size = 6;
        assert_eq!(
            request.to_board(),
            Err(EngineError::SizeMismatch { declared: 6, actual: 5 })
        );
    }

    #[test]
    fn test_rejects_bad_marker() {
        let bad = REQUEST.replace(r#""player": "o""#, r#""player": "z""#);
        assert!(MoveRequest::from_json(&bad).is_err());

        let bad_cell = REQUEST.replacen(r#"["x""#, r#"["q""#, 1);
        assert!(MoveRequest::from_json(&bad_cell).is_err());
    }

    #[test]
    fn test_rejects_ragged_board() {
        let mut request = MoveRequest::from_json(REQUEST).unwrap();
        request.board[3].push(Cell::Empty);
        assert!(matches!(
            request.to_board(),
            Err(EngineError::NotSquare { row: 3, .. })
        ));
    }

    #[test]
    fn test_response_shape() {
        let some = MoveResponse { mv: Some(Move::new(2, 3)) };
        assert_eq!(serde_json::to_string(&some).unwrap(), r#"{"move":{"row":2,"col":3}}"#);
        let none = MoveResponse { mv: None };
        assert_eq!(serde_json::to_string(&none).unwrap(), r#"{"move":null}"#);
    }

    #[test]
    fn test_round_trip_from_board() {
        let board = Board::parse("x....\n.....\n..o..\n.....\n.....").unwrap();
        let request = MoveRequest::new(&board, Player::X);
        assert_eq!(request.to_board().unwrap(), board);
    }
}
