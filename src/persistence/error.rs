//! Persistence error types.

use derive_more::{Display, Error};
use tictactoe_engine::SessionId;
use tracing::instrument;

/// What went wrong talking to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PersistenceErrorKind {
    /// The request never produced a response.
    #[display("request to {} failed: {}", endpoint, message)]
    Transport {
        /// Endpoint path, e.g. `games/`.
        endpoint: String,
        /// Underlying error text.
        message: String,
    },
    /// The service answered with a non-success status.
    #[display("{} returned HTTP {}", endpoint, status)]
    Status {
        /// Endpoint path.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body did not have the expected shape.
    #[display("could not decode response from {}: {}", endpoint, message)]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// Underlying error text.
        message: String,
    },
    /// The session identifier is not known to the service.
    #[display("unknown session {}", _0)]
    UnknownSession(SessionId),
    /// The collaborator cannot serve requests right now.
    #[display("persistence unavailable: {}", _0)]
    Unavailable(String),
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Persistence error: {} at {}:{}", kind, file, line)]
pub struct PersistenceError {
    /// What went wrong.
    pub kind: PersistenceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new persistence error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Request failed before a response arrived.
    #[track_caller]
    pub fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::new(PersistenceErrorKind::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }

    /// Response status was not 2xx.
    #[track_caller]
    pub fn status(endpoint: &str, status: u16) -> Self {
        Self::new(PersistenceErrorKind::Status {
            endpoint: endpoint.to_string(),
            status,
        })
    }

    /// Response body failed to decode.
    #[track_caller]
    pub fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::new(PersistenceErrorKind::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }

    /// Session identifier not recognised.
    #[track_caller]
    pub fn unknown_session(session_id: SessionId) -> Self {
        Self::new(PersistenceErrorKind::UnknownSession(session_id))
    }

    /// Collaborator unavailable.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::Unavailable(message.into()))
    }
}
