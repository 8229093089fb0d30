//! Tic Tac Toe client - variable-size boards with remote result tracking
//!
//! This library wires the [`tictactoe_engine`] game engine to a results
//! service and a terminal UI.
//!
//! # Architecture
//!
//! - **Engine**: pure value transitions that emit [`Effect`]s (re-exported
//!   from `tictactoe_engine`)
//! - **Persistence**: [`PersistenceClient`] with REST and in-memory backends
//! - **Sync**: background worker applying effects in order
//! - **TUI**: ratatui front end
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe::{ClientConfig, GameEngine, RestPersistenceClient, SyncHandle};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::load(None)?;
//! let client = RestPersistenceClient::from_config(&config)?;
//! let sync = SyncHandle::spawn(Arc::new(client));
//!
//! let (engine, effects) = GameEngine::new().start().into_parts();
//! sync.dispatch(effects);
//! let (_engine, effects) = engine.attempt_move(1, 1).into_parts();
//! sync.dispatch(effects);
//! sync.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod persistence;
mod sync;

pub mod tui;

// Crate-level exports - Configuration
pub use config::{API_URL_ENV, ClientConfig, ConfigError};

// Crate-level exports - Persistence
pub use persistence::{
    GameCompletion, GameRecord, HealthStatus, InMemoryPersistence, NewGame, NewMove,
    PersistenceClient, PersistenceError, PersistenceErrorKind, RestPersistenceClient,
    StatsSnapshot,
};

// Crate-level exports - Sync worker
pub use sync::{SyncHandle, SyncReport, SyncWorker};

// Crate-level exports - Engine types
pub use tictactoe_engine::{
    Board, BoardSize, Cell, Effect, GameEngine, GameRef, GameResult, Line, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE, Mark, Outcome, Phase, Rejection, SessionId, Transition,
};
