//! The persistence collaborator interface.

use async_trait::async_trait;
use tictactoe_engine::{BoardSize, GameResult, Mark, SessionId};

use crate::persistence::{HealthStatus, PersistenceError, StatsSnapshot};

/// Records games, moves and results, and supplies aggregate statistics.
///
/// Callers treat every method as best effort: an error is logged at the
/// boundary and never changes the state of the game being played.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Registers a new game and returns its session identifier.
    async fn create_game(&self, board_size: BoardSize) -> Result<SessionId, PersistenceError>;

    /// Records one placed mark.
    async fn record_move(
        &self,
        session_id: SessionId,
        player: Mark,
        row: usize,
        column: usize,
        move_number: u32,
    ) -> Result<(), PersistenceError>;

    /// Marks a game as won or tied.
    async fn complete_game(
        &self,
        session_id: SessionId,
        result: GameResult,
    ) -> Result<(), PersistenceError>;

    /// Fetches aggregate statistics over completed games.
    async fn fetch_stats(&self) -> Result<StatsSnapshot, PersistenceError>;

    /// Checks that the service is reachable.
    async fn health(&self) -> Result<HealthStatus, PersistenceError>;
}
