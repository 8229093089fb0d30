//! Tests for the effect sync worker.

use async_trait::async_trait;
use std::sync::Arc;
use tictactoe::{
    BoardSize, GameEngine, GameResult, HealthStatus, InMemoryPersistence, Mark, Outcome,
    PersistenceClient, PersistenceError, SessionId, StatsSnapshot, SyncHandle, SyncReport,
    SyncWorker,
};

/// Client whose every call fails.
struct FailingClient;

#[async_trait]
impl PersistenceClient for FailingClient {
    async fn create_game(&self, _board_size: BoardSize) -> Result<SessionId, PersistenceError> {
        Err(PersistenceError::unavailable("offline"))
    }

    async fn record_move(
        &self,
        _session_id: SessionId,
        _player: Mark,
        _row: usize,
        _column: usize,
        _move_number: u32,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::unavailable("offline"))
    }

    async fn complete_game(
        &self,
        _session_id: SessionId,
        _result: GameResult,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::unavailable("offline"))
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, PersistenceError> {
        Err(PersistenceError::unavailable("offline"))
    }

    async fn health(&self) -> Result<HealthStatus, PersistenceError> {
        Err(PersistenceError::unavailable("offline"))
    }
}

/// Plays `moves` on a fresh 3x3 game, applying every effect through
/// `worker` and folding session reports back into the engine.
async fn play_through(worker: &mut SyncWorker, moves: &[(usize, usize)]) -> (GameEngine, Vec<SyncReport>) {
    let mut reports = Vec::new();
    let (mut engine, mut effects) = GameEngine::new().start().into_parts();

    let mut pending = moves.iter();
    loop {
        for effect in effects.drain(..) {
            if let Some(report) = worker.apply_effect(effect).await {
                if let SyncReport::SessionCreated { game, session_id } = report {
                    engine = engine.attach_session(game, session_id).into_engine();
                }
                reports.push(report);
            }
        }
        let Some(&(row, col)) = pending.next() else {
            break;
        };
        (engine, effects) = engine.attempt_move(row, col).into_parts();
    }
    (engine, reports)
}

const X_WINS: [(usize, usize); 5] = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];

#[tokio::test]
async fn test_failures_never_change_game_state() {
    let mut failing = SyncWorker::new(Arc::new(FailingClient));
    let mut working = SyncWorker::new(Arc::new(InMemoryPersistence::new()));

    let (failed, failed_reports) = play_through(&mut failing, &X_WINS).await;
    let (succeeded, _) = play_through(&mut working, &X_WINS).await;

    assert_eq!(failed.board(), succeeded.board());
    assert_eq!(failed.turn(), succeeded.turn());
    assert_eq!(failed.move_count(), succeeded.move_count());
    assert_eq!(failed.outcome(), Outcome::Won(Mark::X));
    assert_eq!(failed.outcome(), succeeded.outcome());
    assert_eq!(failed.session_id(), None);

    // Create and stats fail; moves and result are skipped without a session.
    let operations: Vec<&str> = failed_reports
        .iter()
        .map(|r| match r {
            SyncReport::Failed { operation, .. } => *operation,
            other => panic!("unexpected report {:?}", other),
        })
        .collect();
    assert_eq!(operations, vec!["create_game", "fetch_stats"]);
}

#[tokio::test]
async fn test_completed_game_is_recorded_and_counted() {
    let store = InMemoryPersistence::new();
    let mut worker = SyncWorker::new(Arc::new(store.clone()));

    let (engine, reports) = play_through(&mut worker, &X_WINS).await;
    let session_id = engine.session_id().expect("session attached");

    assert_eq!(store.moves(session_id).len(), 5);
    assert_eq!(
        store.game(session_id).expect("game stored").winner(),
        &Some(Mark::X)
    );
    assert_eq!(
        reports.last(),
        Some(&SyncReport::StatsRefreshed(StatsSnapshot::new(1, 0, 0, 1)))
    );
}

#[tokio::test]
async fn test_moves_of_superseded_game_are_not_recorded() {
    let store = InMemoryPersistence::new();
    let mut worker = SyncWorker::new(Arc::new(store.clone()));

    let (first, effects) = GameEngine::new().start().into_parts();
    let old_game = first.game();
    for effect in effects {
        worker.apply_effect(effect).await;
    }
    let first_session = worker.session_for(old_game).expect("session created");

    let (second, effects) = first.start().into_parts();
    for effect in effects {
        worker.apply_effect(effect).await;
    }
    assert_eq!(worker.session_for(old_game), None);

    // A move attributed to the old game arrives late.
    let late = tictactoe::Effect::RecordMove {
        game: old_game,
        player: Mark::X,
        row: 0,
        column: 0,
        move_number: 1,
    };
    assert_eq!(worker.apply_effect(late).await, None);
    assert!(store.moves(first_session).is_empty());
    assert!(worker.session_for(second.game()).is_some());
}

#[tokio::test]
async fn test_handle_applies_effects_in_order() {
    let store = InMemoryPersistence::new();
    let mut sync = SyncHandle::spawn(Arc::new(store.clone()));

    let (engine, effects) = GameEngine::new().start().into_parts();
    sync.dispatch(effects);
    let (engine, effects) = engine.attempt_move(1, 1).into_parts();
    sync.dispatch(effects);
    let (_engine, effects) = engine.attempt_move(0, 0).into_parts();
    sync.dispatch(effects);

    let report = sync.next_report().await.expect("worker running");
    let SyncReport::SessionCreated { session_id, .. } = report else {
        panic!("expected session, got {:?}", report);
    };

    sync.shutdown().await;

    let moves = store.moves(session_id);
    assert_eq!(moves.len(), 2);
    assert_eq!(*moves[0].move_number(), 1);
    assert_eq!(*moves[1].player(), Mark::O);
}
