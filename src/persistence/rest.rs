//! REST client for the results service.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tictactoe_engine::{BoardSize, GameResult, Mark, SessionId};
use tracing::{debug, info, instrument};

use crate::ClientConfig;
use crate::persistence::{
    GameCompletion, GameRecord, HealthStatus, NewGame, NewMove, PersistenceClient,
    PersistenceError, StatsSnapshot,
};

/// [`PersistenceClient`] backed by plain JSON-over-HTTP calls.
#[derive(Debug, Clone)]
pub struct RestPersistenceClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestPersistenceClient {
    /// Creates a client for the service rooted at `base_url`, e.g.
    /// `http://localhost:8000/api`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the HTTP client cannot be built.
    #[instrument(skip(base_url))]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PersistenceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PersistenceError::transport("client", e))?;

        info!(base_url = %base_url, "REST persistence client ready");
        Ok(Self { base_url, client })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, PersistenceError> {
        Self::new(config.api_url().clone(), config.request_timeout())
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%method, %url, "Building request");
        self.client.request(method, url)
    }

    /// Sends a request and checks the status code.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, PersistenceError> {
        let response = request
            .send()
            .await
            .map_err(|e| PersistenceError::transport(endpoint, e))?;

        let status = response.status();
        debug!(%status, endpoint, "Got response");
        if !status.is_success() {
            return Err(PersistenceError::status(endpoint, status.as_u16()));
        }
        Ok(response)
    }

    /// Sends a request and decodes the JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, PersistenceError> {
        self.send(request, endpoint)
            .await?
            .json()
            .await
            .map_err(|e| PersistenceError::decode(endpoint, e))
    }
}

#[async_trait]
impl PersistenceClient for RestPersistenceClient {
    #[instrument(skip(self))]
    async fn create_game(&self, board_size: BoardSize) -> Result<SessionId, PersistenceError> {
        let request = self
            .request(Method::POST, "games/")
            .json(&NewGame::new(board_size));
        let record: GameRecord = self.send_json(request, "games/").await?;

        info!(session_id = %record.id(), "Game created");
        Ok(*record.id())
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
        let body = NewMove::new(session_id, player, row, column, move_number);
        let request = self.request(Method::POST, "moves/").json(&body);
        self.send(request, "moves/").await?;

        debug!("Move recorded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete_game(
        &self,
        session_id: SessionId,
        result: GameResult,
    ) -> Result<(), PersistenceError> {
        let endpoint = format!("games/{}/", session_id);
        let request = self
            .request(Method::PATCH, &endpoint)
            .json(&GameCompletion::from(result));
        let record: GameRecord = self.send_json(request, &endpoint).await?;

        info!(completed = record.is_completed(), "Game completed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<StatsSnapshot, PersistenceError> {
        let request = self.request(Method::GET, "stats/");
        let stats: StatsSnapshot = self.send_json(request, "stats/").await?;

        debug!(total_games = stats.total_games(), "Stats fetched");
        Ok(stats)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, PersistenceError> {
        let request = self.request(Method::GET, "health/");
        self.send_json(request, "health/").await
    }
}
