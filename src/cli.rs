//! Command-line interface for tictactoe.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tic Tac Toe - variable-size boards with result tracking
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play N x N tic tac toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the results service.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Results service base URL (overrides config and TICTACTOE_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Initial board size (3-15)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(3..=15))]
        size: Option<u8>,

        /// Keep results in memory instead of calling the service
        #[arg(long)]
        offline: bool,
    },

    /// Print aggregate statistics
    Stats {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Check that the results service is reachable
    Health {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}
