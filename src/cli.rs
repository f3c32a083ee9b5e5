//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_core::{GameMode, Side};

/// Tic-tac-toe in the terminal against a friend or an unbeatable AI
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Console tic-tac-toe with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively
    Play {
        /// Skip the menu and start in this mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Path to the TOML config file
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Print how many positions the AI searched after each reply
        #[arg(long)]
        stats: bool,
    },

    /// Print the best move for a position
    Analyze {
        /// Board as nine cells, e.g. "XO./.X./..." (`.` or `-` for empty)
        board: String,

        /// Side to move (inferred from the mark counts when omitted)
        #[arg(short, long, value_enum)]
        side: Option<SideArg>,
    },
}

/// Game mode as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Player vs Player
    Pvp,
    /// Player vs AI (the AI plays O)
    Pva,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Pva => GameMode::PlayerVsAutomated,
        }
    }
}

/// Side as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    /// Side X
    X,
    /// Side O
    O,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::X => Side::X,
            SideArg::O => Side::O,
        }
    }
}
