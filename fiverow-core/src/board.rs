//! Square board geometry, cells and moves

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Smallest board on which a five can fit
pub const MIN_BOARD_SIZE: usize = WIN_LENGTH;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side marker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }
}

impl TryFrom<char> for Player {
    type Error = EngineError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'x' | 'X' => Ok(Player::X),
            'o' | 'O' => Ok(Player::O),
            other => Err(EngineError::InvalidMarker(other)),
        }
    }
}

impl From<Player> for char {
    fn from(player: Player) -> char {
        player.marker()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Contents of a single square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl TryFrom<char> for Cell {
    type Error = EngineError;

    /// `' '` is the wire form of an empty square; `'.'` is accepted for text boards.
    fn try_from(c: char) -> Result<Self> {
        match c {
            ' ' | '.' => Ok(Cell::Empty),
            other => Player::try_from(other).map(Cell::Stone),
        }
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> char {
        match cell {
            Cell::Empty => ' ',
            Cell::Stone(p) => p.marker(),
        }
    }
}

/// A placement on an empty square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// N x N grid stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Empty board of the given size
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(EngineError::BoardTooSmall { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build from rows, rejecting ragged or undersized grids
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        let size = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(EngineError::BoardTooSmall { size });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            if line.len() != size {
                return Err(EngineError::NotSquare {
                    row,
                    len: line.len(),
                    size,
                });
            }
            cells.extend_from_slice(line);
        }

        Ok(Self { size, cells })
    }

    /// Parse a text board, one line per row (`.` or space for empty).
    ///
    /// Zero-length lines are ignored so a trailing newline is harmless.
    pub fn parse(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Cell::try_from).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&rows)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn contains(&self, mv: Move) -> bool {
        mv.row < self.size && mv.col < self.size
    }

    /// Cell at `(row, col)`; panics when out of bounds like slice indexing
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    pub fn get(&self, mv: Move) -> Cell {
        self.cell(mv.row, mv.col)
    }

    fn set(&mut self, mv: Move, cell: Cell) {
        let idx = mv.row * self.size + mv.col;
        self.cells[idx] = cell;
    }

    /// Place a stone permanently after checking the square
    pub fn place(&mut self, mv: Move, player: Player) -> Result<()> {
        self.check_placement(mv)?;
        self.set(mv, Cell::Stone(player));
        Ok(())
    }

    /// Place a stone that is removed again when the guard is dropped.
    ///
    /// The square must be empty and in bounds; the search only ever passes
    /// moves taken from `available_moves`.
    pub fn place_scoped(&mut self, mv: Move, player: Player) -> Placed<'_> {
        debug_assert!(self.contains(mv) && self.get(mv).is_empty());
        self.set(mv, Cell::Stone(player));
        Placed { board: self, mv }
    }

    pub fn check_placement(&self, mv: Move) -> Result<()> {
        if !self.contains(mv) {
            return Err(EngineError::OutOfBounds {
                row: mv.row,
                col: mv.col,
                size: self.size,
            });
        }
        if !self.get(mv).is_empty() {
            return Err(EngineError::Occupied {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(())
    }

    /// Empty squares in row-major order
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| Move::new(idx / self.size, idx % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Visit every row, column and diagonal (both directions) holding at
    /// least `min_len` cells.
    ///
    /// Diagonals are enumerated by offset `d` in `-(n-1)..n`; the main
    /// direction covers `(i, i - d)` and the anti direction `(i, n - 1 - i + d)`.
    pub fn for_each_line<F>(&self, min_len: usize, mut f: F)
    where
        F: FnMut(&[Cell]),
    {
        let n = self.size;
        let mut buf = Vec::with_capacity(n);

        for r in 0..n {
            if n >= min_len {
                f(self.row(r));
            }
        }

        for c in 0..n {
            if n >= min_len {
                buf.clear();
                buf.extend((0..n).map(|r| self.cell(r, c)));
                f(&buf);
            }
        }

        let n_i = n as isize;
        for d in (1 - n_i)..n_i {
            if n - d.unsigned_abs() < min_len {
                continue;
            }
            let start = d.max(0);
            let end = n_i.min(n_i + d);

            buf.clear();
            buf.extend((start..end).map(|i| self.cell(i as usize, (i - d) as usize)));
            f(&buf);

            buf.clear();
            buf.extend((start..end).map(|i| self.cell(i as usize, (n_i - 1 - i + d) as usize)));
            f(&buf);
        }
    }

    /// Multi-line text form using `.` for empty squares
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for r in 0..self.size {
            for cell in self.row(r) {
                out.push(match cell {
                    Cell::Empty => '.',
                    Cell::Stone(p) => p.marker(),
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// SCOPED PLACEMENT
// ============================================================================

/// A temporarily placed stone; the square is emptied again on drop,
/// including during unwinding.
pub struct Placed<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.set(self.mv, Cell::Empty);
    }
}
