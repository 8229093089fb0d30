//! Core domain types for variable-size tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest playable board side length.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest playable board side length.
pub const MAX_BOARD_SIZE: usize = 15;

/// Mark placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (always moves first).
    #[display("X")]
    X,
    /// Player O.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Returns true if nothing has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Board side length outside of the playable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Board size {} is outside {}..={}", _0, MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
pub struct InvalidBoardSize(#[error(not(source))] pub usize);

/// Validated board side length N, with `MIN_BOARD_SIZE <= N <= MAX_BOARD_SIZE`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct BoardSize(usize);

impl BoardSize {
    /// Standard 3x3 board.
    pub const CLASSIC: BoardSize = BoardSize(MIN_BOARD_SIZE);

    /// Validates a side length.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoardSize`] when `n` is below 3 or above 15.
    #[instrument]
    pub fn new(n: usize) -> Result<Self, InvalidBoardSize> {
        if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n) {
            Ok(Self(n))
        } else {
            Err(InvalidBoardSize(n))
        }
    }

    /// Returns the side length.
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells on a board of this size.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = InvalidBoardSize;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

/// Square N×N board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given size.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Returns true if `(row, col)` is on the board and empty.
    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Places a mark. Returns `false` when the coordinates are out of bounds.
    ///
    /// No occupancy check happens here; legality belongs to the engine.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Iterates over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.get())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let n = self.size.get();
        (row < n && col < n).then(|| row * n + col)
    }

    /// Formats the board as text, `.` for empty cells.
    pub fn display(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => ".".to_string(),
                        Cell::Occupied(mark) => mark.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

/// A full-length line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Line {
    /// Row by index.
    #[display("row {}", _0)]
    Row(usize),
    /// Column by index.
    #[display("column {}", _0)]
    Column(usize),
    /// Top-left to bottom-right.
    #[display("main diagonal")]
    MainDiagonal,
    /// Top-right to bottom-left.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl Line {
    /// Returns true if `(row, col)` lies on this line for a board of side `n`.
    pub fn contains(self, n: usize, row: usize, col: usize) -> bool {
        match self {
            Line::Row(r) => r == row,
            Line::Column(c) => c == col,
            Line::MainDiagonal => row == col,
            Line::AntiDiagonal => row + col + 1 == n,
        }
    }
}

/// Outcome of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// A player completed a line.
    Won(Mark),
    /// Board full without a line.
    Tied,
}

impl Outcome {
    /// Returns true once the game has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner, if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(mark) => write!(f, "Player {} wins", mark),
            Outcome::Tied => write!(f, "Tie"),
        }
    }
}
