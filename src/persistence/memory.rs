//! In-process results store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use strum::IntoEnumIterator;
use tictactoe_engine::{BoardSize, GameResult, Mark, SessionId};
use tracing::{debug, info, instrument, warn};

use crate::persistence::{
    GameCompletion, GameRecord, HealthStatus, NewMove, PersistenceClient, PersistenceError,
    StatsSnapshot,
};

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    games: BTreeMap<SessionId, GameRecord>,
    moves: Vec<NewMove>,
}

/// [`PersistenceClient`] that keeps everything in memory.
///
/// Counts statistics the same way the results service does: only games
/// with a winner or a tie are included. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    store: Arc<Mutex<Store>>,
}

impl InMemoryPersistence {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory persistence");
        Self::default()
    }

    fn store(&self) -> Result<MutexGuard<'_, Store>, PersistenceError> {
        self.store
            .lock()
            .map_err(|_| PersistenceError::unavailable("in-memory store lock poisoned"))
    }

    /// Returns the stored game, if any.
    #[instrument(skip(self))]
    pub fn game(&self, session_id: SessionId) -> Option<GameRecord> {
        self.store().ok()?.games.get(&session_id).cloned()
    }

    /// Returns the moves recorded for a game, in arrival order.
    #[instrument(skip(self))]
    pub fn moves(&self, session_id: SessionId) -> Vec<NewMove> {
        self.store()
            .map(|store| {
                store
                    .moves
                    .iter()
                    .filter(|m| *m.game() == session_id)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of games created so far, completed or not.
    #[instrument(skip(self))]
    pub fn game_count(&self) -> usize {
        self.store().map(|store| store.games.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PersistenceClient for InMemoryPersistence {
    #[instrument(skip(self))]
    async fn create_game(&self, board_size: BoardSize) -> Result<SessionId, PersistenceError> {
        let mut store = self.store()?;
        store.next_id += 1;
        let id = SessionId(store.next_id);
        store.games.insert(id, GameRecord::created(id, board_size));

        info!(session_id = %id, "Game created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn record_move(
        &self,
        session_id: SessionId,
        player: Mark,
        row: usize,
        column: usize,
        move_number: u32,
    ) -> Result<(), PersistenceError> {
        let mut store = self.store()?;
        if !store.games.contains_key(&session_id) {
            warn!("Move for unknown game");
            return Err(PersistenceError::unknown_session(session_id));
        }
        store
            .moves
            .push(NewMove::new(session_id, player, row, column, move_number));

        debug!("Move recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete_game(
        &self,
        session_id: SessionId,
        result: GameResult,
    ) -> Result<(), PersistenceError> {
        let mut store = self.store()?;
        let game = store
            .games
            .get_mut(&session_id)
            .ok_or_else(|| PersistenceError::unknown_session(session_id))?;
        game.complete(GameCompletion::from(result));

        info!(%result, "Game completed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<StatsSnapshot, PersistenceError> {
        let store = self.store()?;
        let completed: Vec<&GameRecord> = store.games.values().filter(|g| g.is_completed()).collect();

        let [x_wins, o_wins] = {
            let mut wins = [0u64; 2];
            for (slot, mark) in wins.iter_mut().zip(Mark::iter()) {
                *slot = completed.iter().filter(|g| *g.winner() == Some(mark)).count() as u64;
            }
            wins
        };
        let ties = completed.iter().filter(|g| *g.is_tie()).count() as u64;

        let stats = StatsSnapshot::new(x_wins, o_wins, ties, completed.len() as u64);
        debug!(?stats, "Stats computed");
        Ok(stats)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, PersistenceError> {
        self.store()?;
        Ok(HealthStatus::new("healthy", "In-memory store"))
    }
}
