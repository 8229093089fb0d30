//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictactoe_engine::BoardSize;
use tracing::{debug, info, instrument};

/// Environment variable that overrides [`ClientConfig::api_url`].
pub const API_URL_ENV: &str = "TICTACTOE_API_URL";

/// Settings for the game client.
///
/// Sources are layered: built-in defaults, then an optional TOML file,
/// then the environment, then command-line flags (applied by the caller
/// through the `with_*` setters).
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the results service.
    api_url: String,

    /// Per-request timeout in seconds.
    request_timeout_secs: u64,

    /// Board size selected at startup.
    board_size: BoardSize,

    /// File the terminal UI writes its logs to.
    log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 5,
            board_size: BoardSize::default(),
            log_file: PathBuf::from("tictactoe_tui.log"),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(api_url = %config.api_url, board_size = %config.board_size, "Config loaded");
        Ok(config)
    }

    /// Builds the effective configuration: `path` if given, otherwise
    /// defaults, with the environment applied on top.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }

    /// Applies environment overrides.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!(%url, "API URL taken from environment");
                self.with_api_url(url)
            }
            _ => self,
        }
    }

    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
