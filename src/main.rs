//! Tic-tac-toe console
//!
//! Play against a friend or an unbeatable minimax opponent, or ask for the
//! best move in any position.

#![warn(missing_docs)]

mod cli;
mod config;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SideArg};
use config::ConsoleConfig;
use console::Console;
use tictactoe_core::Board;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            config,
            stats,
        } => {
            let mut config = ConsoleConfig::load_or_default(&config)?;
            if let Some(mode) = mode {
                config = config.with_mode(mode.into());
            }
            if stats {
                config = config.with_search_stats();
            }
            run_play(config)
        }
        Command::Analyze { board, side } => run_analyze(board, side),
    }
}

/// Run the interactive console on stdin/stdout
#[instrument(skip_all)]
fn run_play(config: ConsoleConfig) -> Result<()> {
    initialize_tracing(config.log_filter());
    info!(?config, "Starting console");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock(), config).run()
}

/// Print the best move for a board given on the command line
fn run_analyze(board: String, side: Option<SideArg>) -> Result<()> {
    initialize_tracing(ConsoleConfig::default().log_filter());

    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board {:?}", board))?;
    console::analyze(&board, side.map(Into::into), &mut std::io::stdout().lock())
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
