//! Wire types exchanged with the results service.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_engine::{BoardSize, GameResult, Mark, SessionId};
use tracing::instrument;

/// Aggregate results over all completed games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
pub struct StatsSnapshot {
    x_wins: u64,
    o_wins: u64,
    ties: u64,
    total_games: u64,
}

impl StatsSnapshot {
    /// Wins recorded for `mark`.
    #[instrument(skip(self))]
    pub fn wins_for(&self, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }
}

/// Body of `POST games/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct NewGame {
    board_size: BoardSize,
}

/// A game as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    id: SessionId,
    board_size: usize,
    #[serde(default)]
    winner: Option<Mark>,
    #[serde(default)]
    is_tie: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl GameRecord {
    /// Builds a record for a game that has just been created.
    #[instrument]
    pub fn created(id: SessionId, board_size: BoardSize) -> Self {
        Self {
            id,
            board_size: board_size.get(),
            winner: None,
            is_tie: false,
            created_at: Some(Utc::now()),
        }
    }

    /// True once the game has a winner or was tied.
    pub fn is_completed(&self) -> bool {
        self.winner.is_some() || self.is_tie
    }

    /// Applies a completion payload.
    pub(crate) fn complete(&mut self, completion: GameCompletion) {
        match completion {
            GameCompletion::Winner { winner } => self.winner = Some(winner),
            GameCompletion::Tie { is_tie } => self.is_tie = is_tie,
        }
    }
}

/// Body of `POST moves/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct NewMove {
    game: SessionId,
    player: Mark,
    row: usize,
    column: usize,
    move_number: u32,
}

/// Body of `PATCH games/{id}/`: either `{"winner": "X"}` or `{"is_tie": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameCompletion {
    /// A player won.
    Winner {
        /// The winning mark.
        winner: Mark,
    },
    /// Nobody won.
    Tie {
        /// Always `true` when sent.
        is_tie: bool,
    },
}

impl From<GameResult> for GameCompletion {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Winner(winner) => Self::Winner { winner },
            GameResult::Tie => Self::Tie { is_tie: true },
        }
    }
}

/// Body of `GET health/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HealthStatus {
    status: String,
    #[serde(default)]
    message: String,
}

impl HealthStatus {
    /// Creates a health status.
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    /// True when the service reports itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
