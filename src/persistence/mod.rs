//! Results persistence: the client interface, its REST and in-memory
//! implementations, and the wire types they exchange.

mod client;
mod error;
mod memory;
mod models;
mod rest;

pub use client::PersistenceClient;
pub use error::{PersistenceError, PersistenceErrorKind};
pub use memory::InMemoryPersistence;
pub use models::{GameCompletion, GameRecord, HealthStatus, NewGame, NewMove, StatsSnapshot};
pub use rest::RestPersistenceClient;
