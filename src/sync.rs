//! Background worker that carries engine effects to persistence.
//!
//! The engine never awaits the collaborator. Effects are sent over a
//! channel to a [`SyncWorker`] task, which applies them one at a time in
//! emission order and sends back [`SyncReport`]s for the UI to fold in.

use std::sync::Arc;
use tictactoe_engine::{Effect, GameRef, SessionId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::persistence::{PersistenceClient, PersistenceError, StatsSnapshot};

/// What the worker learned while applying an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    /// The collaborator issued a session identifier for `game`.
    SessionCreated {
        /// Local handle of the game.
        game: GameRef,
        /// Identifier issued by the collaborator.
        session_id: SessionId,
    },
    /// A fresh statistics snapshot arrived.
    StatsRefreshed(StatsSnapshot),
    /// A call failed. Informational only.
    Failed {
        /// Name of the failed operation.
        operation: &'static str,
        /// Error text.
        message: String,
    },
}

impl SyncReport {
    fn failed(operation: &'static str, err: &PersistenceError) -> Self {
        warn!(operation, error = %err, "Persistence call failed");
        Self::Failed {
            operation,
            message: err.kind.to_string(),
        }
    }
}

/// Applies effects against a [`PersistenceClient`].
pub struct SyncWorker {
    client: Arc<dyn PersistenceClient>,
    current: Option<(GameRef, Option<SessionId>)>,
}

impl SyncWorker {
    /// Creates a worker for `client`.
    pub fn new(client: Arc<dyn PersistenceClient>) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// Session identifier known for `game`, if any.
    pub fn session_for(&self, game: GameRef) -> Option<SessionId> {
        match self.current {
            Some((current, session_id)) if current == game => session_id,
            _ => None,
        }
    }

    /// Applies one effect. Failures are logged and turned into a report;
    /// they are never returned as errors.
    #[instrument(skip(self))]
    pub async fn apply_effect(&mut self, effect: Effect) -> Option<SyncReport> {
        match effect {
            Effect::CreateGame { game, board_size } => {
                // Forget the previous session even if creation fails.
                self.current = Some((game, None));
                match self.client.create_game(board_size).await {
                    Ok(session_id) => {
                        self.current = Some((game, Some(session_id)));
                        info!(%game, %session_id, "Session created");
                        Some(SyncReport::SessionCreated { game, session_id })
                    }
                    Err(e) => Some(SyncReport::failed("create_game", &e)),
                }
            }
            Effect::RecordMove {
                game,
                player,
                row,
                column,
                move_number,
            } => {
                let Some(session_id) = self.session_for(game) else {
                    debug!(%game, "No session for move, skipping");
                    return None;
                };
                match self
                    .client
                    .record_move(session_id, player, row, column, move_number)
                    .await
                {
                    Ok(()) => None,
                    Err(e) => Some(SyncReport::failed("record_move", &e)),
                }
            }
            Effect::CompleteGame { game, result } => {
                let Some(session_id) = self.session_for(game) else {
                    debug!(%game, "No session for result, skipping");
                    return None;
                };
                match self.client.complete_game(session_id, result).await {
                    Ok(()) => None,
                    Err(e) => Some(SyncReport::failed("complete_game", &e)),
                }
            }
            Effect::RefreshStats => match self.client.fetch_stats().await {
                Ok(stats) => Some(SyncReport::StatsRefreshed(stats)),
                Err(e) => Some(SyncReport::failed("fetch_stats", &e)),
            },
        }
    }

    /// Applies effects until the sending side closes.
    #[instrument(skip_all)]
    pub async fn run(
        mut self,
        mut effects: mpsc::UnboundedReceiver<Effect>,
        reports: mpsc::UnboundedSender<SyncReport>,
    ) {
        info!("Sync worker started");
        while let Some(effect) = effects.recv().await {
            let Some(report) = self.apply_effect(effect).await else {
                continue;
            };
            if reports.send(report).is_err() {
                debug!("Report receiver dropped");
            }
        }
        info!("Sync worker stopped");
    }
}

/// Owning handle to a spawned [`SyncWorker`].
pub struct SyncHandle {
    effects: mpsc::UnboundedSender<Effect>,
    reports: mpsc::UnboundedReceiver<SyncReport>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Spawns a worker for `client` on the current tokio runtime.
    #[instrument(skip_all)]
    pub fn spawn(client: Arc<dyn PersistenceClient>) -> Self {
        let (effects, effect_rx) = mpsc::unbounded_channel();
        let (report_tx, reports) = mpsc::unbounded_channel();
        let task = tokio::spawn(SyncWorker::new(client).run(effect_rx, report_tx));
        Self {
            effects,
            reports,
            task,
        }
    }

    /// Queues effects in order.
    pub fn dispatch(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            if self.effects.send(effect).is_err() {
                warn!("Sync worker is gone, effect dropped");
            }
        }
    }

    /// Returns the next pending report without waiting.
    pub fn try_next_report(&mut self) -> Option<SyncReport> {
        self.reports.try_recv().ok()
    }

    /// Waits for the next report. `None` once the worker has stopped.
    pub async fn next_report(&mut self) -> Option<SyncReport> {
        self.reports.recv().await
    }

    /// Closes the effect channel and waits for queued effects to drain.
    #[instrument(skip_all)]
    pub async fn shutdown(self) {
        let Self { effects, task, .. } = self;
        drop(effects);
        if let Err(e) = task.await {
            warn!(error = %e, "Sync worker ended abnormally");
        }
    }
}
