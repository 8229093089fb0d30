//! Tic Tac Toe - Unified CLI
//!
//! Terminal play plus one-shot queries against the results service.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, ConnectionArgs};
use std::path::Path;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tictactoe::{
    BoardSize, ClientConfig, InMemoryPersistence, Mark, PersistenceClient, RestPersistenceClient,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tictactoe=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            connection,
            size,
            offline,
        } => run_play(connection, size, offline).await,
        Command::Stats { connection } => run_stats(connection).await,
        Command::Health { connection } => run_health(connection).await,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr for the one-shot commands.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to a file so output does not tear the terminal UI.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Layers file, environment and flag settings.
fn load_config(connection: &ConnectionArgs) -> Result<ClientConfig> {
    let config = ClientConfig::load(connection.config.as_deref())?;
    Ok(match &connection.api_url {
        Some(url) => config.with_api_url(url.clone()),
        None => config,
    })
}

fn rest_client(config: &ClientConfig) -> Result<RestPersistenceClient> {
    Ok(RestPersistenceClient::from_config(config)?)
}

/// Run the terminal UI
async fn run_play(connection: ConnectionArgs, size: Option<u8>, offline: bool) -> Result<()> {
    let mut config = load_config(&connection)?;
    if let Some(size) = size {
        config = config.with_board_size(BoardSize::new(usize::from(size))?);
    }

    init_file_logging(config.log_file())?;
    info!(api_url = %config.api_url(), offline, "Starting tictactoe TUI");

    let client: Arc<dyn PersistenceClient> = if offline {
        Arc::new(InMemoryPersistence::new())
    } else {
        Arc::new(rest_client(&config)?)
    };

    tictactoe::tui::run(&config, client).await
}

/// Print aggregate statistics
#[instrument(skip_all)]
async fn run_stats(connection: ConnectionArgs) -> Result<()> {
    init_stderr_logging();
    let config = load_config(&connection)?;
    let stats = rest_client(&config)?.fetch_stats().await?;

    println!("Games played: {}", stats.total_games());
    for mark in Mark::iter() {
        println!("{} wins:       {}", mark, stats.wins_for(mark));
    }
    println!("Ties:         {}", stats.ties());
    Ok(())
}

/// Check the results service
#[instrument(skip_all)]
async fn run_health(connection: ConnectionArgs) -> Result<()> {
    init_stderr_logging();
    let config = load_config(&connection)?;
    let health = rest_client(&config)?.health().await?;

    println!("{}: {}", health.status(), health.message());
    if !health.is_healthy() {
        anyhow::bail!("Service at {} reports {}", config.api_url(), health.status());
    }
    Ok(())
}
