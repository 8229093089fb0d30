//! Outbound effects and rejection reasons.
//!
//! Transitions never perform I/O. Anything the outside world should hear
//! about (a game was started, a mark was placed, a game ended) is emitted
//! as an [`Effect`] for an adapter to carry out.

use super::{BoardSize, Mark, Outcome};
use serde::{Deserialize, Serialize};

/// Identifier issued by the persistence collaborator for one game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

/// Local handle for one started game.
///
/// Every `start` bumps the generation, so results arriving late for an
/// earlier game can be told apart from the current one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[display("game#{}", _0)]
pub struct GameRef(pub u64);

impl GameRef {
    /// The handle of the next started game.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// How a finished game ended, as reported to persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameResult {
    /// One player completed a line.
    #[display("{} wins", _0)]
    Winner(Mark),
    /// Full board, no line.
    #[display("tie")]
    Tie,
}

impl GameResult {
    /// Converts a terminal outcome. Returns `None` while in progress.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::InProgress => None,
            Outcome::Won(mark) => Some(Self::Winner(mark)),
            Outcome::Tied => Some(Self::Tie),
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Ask for a session identifier for a freshly started game.
    CreateGame {
        /// Local handle of the game.
        game: GameRef,
        /// Side length of its board.
        board_size: BoardSize,
    },
    /// Record one placed mark.
    RecordMove {
        /// Local handle of the game.
        game: GameRef,
        /// Who moved.
        player: Mark,
        /// 0-indexed row.
        row: usize,
        /// 0-indexed column.
        column: usize,
        /// 1-based move number.
        move_number: u32,
    },
    /// Record the end of a game.
    CompleteGame {
        /// Local handle of the game.
        game: GameRef,
        /// Winner or tie.
        result: GameResult,
    },
    /// Fetch a fresh statistics snapshot.
    RefreshStats,
}

impl Effect {
    /// The game this effect belongs to, if any.
    pub fn game(&self) -> Option<GameRef> {
        match self {
            Effect::CreateGame { game, .. }
            | Effect::RecordMove { game, .. }
            | Effect::CompleteGame { game, .. } => Some(*game),
            Effect::RefreshStats => None,
        }
    }
}

/// Why a transition left the engine unchanged.
///
/// Rejections are informational only. Callers log them and keep waiting
/// for valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Rejection {
    /// Requested size is outside 3..=15.
    #[display("Board size {} is out of range", _0)]
    BoardSizeOutOfRange(usize),

    /// A game with moves on the board is still in progress.
    #[display("Board size is locked while a game is in progress")]
    BoardSizeLocked,

    /// No game has been started yet.
    #[display("Game has not been started")]
    NotStarted,

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// Target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, col)]
    CellOccupied {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Coordinates fall outside the board.
    #[display("Cell ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Session reported for a game that is no longer current.
    #[display("Session belongs to a stale game")]
    StaleSession,
}

impl Rejection {
    /// True for rejections caused by an illegal move request.
    pub fn is_illegal_move(self) -> bool {
        matches!(
            self,
            Rejection::NotStarted
                | Rejection::GameOver
                | Rejection::CellOccupied { .. }
                | Rejection::OutOfBounds { .. }
        )
    }
}

impl std::error::Error for Rejection {}
