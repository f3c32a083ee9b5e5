//! Line-oriented console front end.
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so the
//! whole interaction can be scripted in tests.

use crate::config::ConsoleConfig;
use anyhow::Result;
use std::io::{BufRead, Write};
use tictactoe_core::{Board, GameMode, MoveResult, Position, SearchError, Session, Side, best_move};
use tracing::{debug, info, instrument};

const MOVE_HELP: &str = "Enter a move as 'row col' (0-2), a cell number 1-9 or a name like \
     'center'. 'h' lists moves, 'r' resets, 'e' ends the game, 'q' quits.";

/// What the player typed during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameCommand {
    Move { row: usize, col: usize },
    History,
    Reset,
    EndGame,
    Quit,
}

/// Why a game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameExit {
    Menu,
    Quit,
}

/// Interactive console driving [`Session`]s.
pub struct Console<R, W> {
    input: R,
    output: W,
    config: ConsoleConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W, config: ConsoleConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Runs menus and games until the player quits or input ends.
    #[instrument(skip_all)]
    pub fn run(&mut self) -> Result<()> {
        let mut preset = *self.config.mode();
        loop {
            let mode = match preset.take() {
                Some(mode) => mode,
                None => match self.main_menu()? {
                    Some(mode) => mode,
                    None => break,
                },
            };
            info!(mode = mode.label(), "Starting game");
            if self.play(mode)? == GameExit::Quit {
                break;
            }
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Shows the menu; `None` means quit.
    fn main_menu(&mut self) -> Result<Option<GameMode>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Tic Tac Toe")?;
            writeln!(self.output, "1) {}", GameMode::PlayerVsPlayer.label())?;
            writeln!(self.output, "2) {}", GameMode::PlayerVsAutomated.label())?;
            writeln!(self.output, "q) Quit")?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(None);
            };
            match line.as_str() {
                "1" => return Ok(Some(GameMode::PlayerVsPlayer)),
                "2" => return Ok(Some(GameMode::PlayerVsAutomated)),
                "q" | "quit" => return Ok(None),
                other => writeln!(self.output, "Unknown choice '{}'", other)?,
            }
        }
    }

    /// Plays games in one session until the player ends it.
    #[instrument(skip(self))]
    fn play(&mut self, mode: GameMode) -> Result<GameExit> {
        let mut session = Session::new(mode);
        writeln!(self.output)?;
        writeln!(self.output, "{}", session.scoreboard())?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", render_board(session.board()))?;
            writeln!(self.output, "Player {}'s turn", session.to_move())?;

            let Some(line) = self.prompt("> ")? else {
                session.end_session();
                return Ok(GameExit::Quit);
            };
            let Some(command) = parse_command(&line) else {
                writeln!(self.output, "{}", MOVE_HELP)?;
                continue;
            };
            debug!(?command, "Parsed command");

            match command {
                GameCommand::Quit => {
                    session.end_session();
                    return Ok(GameExit::Quit);
                }
                GameCommand::EndGame => {
                    session.end_session();
                    writeln!(self.output, "Game ended.")?;
                    return Ok(GameExit::Menu);
                }
                GameCommand::History => self.print_history(&session)?,
                GameCommand::Reset => {
                    session.reset();
                    writeln!(self.output, "Board reset.")?;
                }
                GameCommand::Move { row, col } => self.submit(&mut session, row, col)?,
            }
        }
    }

    fn submit(&mut self, session: &mut Session, row: usize, col: usize) -> Result<()> {
        let outcome = match session.submit_move(row, col)? {
            MoveResult::Rejected(reason) => {
                writeln!(self.output, "{}. Try again.", reason)?;
                return Ok(());
            }
            MoveResult::Accepted(outcome) => outcome,
        };

        if let Some(reply) = session.last_reply() {
            write!(self.output, "AI plays {}", reply.position())?;
            if *self.config.show_search_stats() {
                write!(self.output, " (searched {} positions)", reply.nodes())?;
            }
            writeln!(self.output)?;
        }

        if !outcome.is_terminal() {
            return Ok(());
        }
        let message = match outcome.winner() {
            Some(side) if session.mode().automated_side() == Some(side) => "AI wins!".to_string(),
            Some(side) => format!("Player {} wins!", side),
            None => "It's a draw!".to_string(),
        };
        writeln!(self.output, "{}", message)?;
        writeln!(self.output, "{}", session.scoreboard())?;
        Ok(())
    }

    /// Lists the moves of the current game.
    fn print_history(&mut self, session: &Session) -> Result<()> {
        if session.history().is_empty() {
            writeln!(self.output, "No moves yet.")?;
        }
        for (turn, mv) in session.history().iter().enumerate() {
            writeln!(self.output, "{}. {}", turn + 1, mv)?;
        }
        Ok(())
    }

    /// Writes a prompt and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}

/// Parses a game command: `h`, `r`, `e`, `q`, `row col`, a cell number or a name.
fn parse_command(line: &str) -> Option<GameCommand> {
    match line {
        "h" | "history" => return Some(GameCommand::History),
        "r" | "reset" => return Some(GameCommand::Reset),
        "e" | "end" => return Some(GameCommand::EndGame),
        "q" | "quit" => return Some(GameCommand::Quit),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    if let [row, col] = parts.as_slice()
        && let (Ok(row), Ok(col)) = (row.parse(), col.parse())
    {
        return Some(GameCommand::Move { row, col });
    }

    Position::from_label_or_number(line).map(|pos| GameCommand::Move {
        row: pos.row(),
        col: pos.col(),
    })
}

/// Board grid with empty cells shown by their number.
pub fn render_board(board: &Board) -> String {
    board
        .cells()
        .iter()
        .zip(Position::ALL.chunks(3))
        .map(|(cells, positions)| {
            cells
                .iter()
                .zip(positions)
                .map(|(cell, pos)| match cell.side() {
                    Some(side) => side.to_string(),
                    None => pos.number().to_string(),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n-+-+-\n")
}

/// Prints the best move for `side` (or the side whose turn it is).
#[instrument(skip(board, output))]
pub fn analyze(board: &Board, side: Option<Side>, output: &mut impl Write) -> Result<()> {
    let side = side.unwrap_or_else(|| board.side_to_move());
    writeln!(output, "{}", board)?;
    writeln!(output)?;

    let result = match best_move(board, side) {
        Ok(result) => result,
        Err(SearchError::NoLegalMove { outcome }) => {
            writeln!(output, "Board is already decided: {}", outcome)?;
            return Ok(());
        }
    };

    writeln!(
        output,
        "Best move for {}: {} (row {}, col {})",
        side,
        result.position(),
        result.row(),
        result.col()
    )?;
    writeln!(output, "Expected result: {}", result.predicted_outcome())?;
    writeln!(output, "Positions searched: {}", result.nodes())?;
    Ok(())
}
