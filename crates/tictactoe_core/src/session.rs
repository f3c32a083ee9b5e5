//! Game session: turn order, outcome handling and the automated opponent.
//!
//! A [`Session`] owns its board and scoreboard. Nothing is global, so any
//! number of sessions can run side by side.

use super::error::{BoardError, EngineError};
use super::rules::evaluate;
use super::scoreboard::Scoreboard;
use super::search::{SearchResult, best_move};
use super::{Board, GameMode, Outcome, Position, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Where the per-game state machine currently is.
///
/// `GameOver` is only held while a finished game is being recorded; by the
/// time a call returns the session is back in `AwaitingMove(Side::X)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for this side to place a mark.
    AwaitingMove(Side),
    /// The game just ended with this outcome.
    GameOver(Outcome),
}

/// Why a submitted move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum RejectReason {
    /// Row or column outside the 3x3 grid.
    #[display("That cell is outside the board")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("That cell is already taken")]
    CellOccupied,
    /// [`Session::end_session`] was called.
    #[display("The session has ended")]
    SessionEnded,
}

impl From<BoardError> for RejectReason {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange { .. } => RejectReason::OutOfRange,
            BoardError::CellOccupied { .. } => RejectReason::CellOccupied,
        }
    }
}

/// Result of [`Session::submit_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// The move was played. Carries the outcome after any automated reply.
    Accepted(Outcome),
    /// The move was refused and nothing changed.
    Rejected(RejectReason),
}

/// An accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Move {
    /// The side that moved.
    side: Side,
    /// Where the mark went.
    position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.position.label())
    }
}

/// Immutable view handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board contents.
    board: Board,
    /// Side whose move is expected next.
    to_move: Side,
    /// Results so far in this session.
    scoreboard: Scoreboard,
    /// Mode the session was created with.
    mode: GameMode,
}

/// One running game session.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Mode fixed at creation.
    mode: GameMode,
    /// Board of the game in progress.
    board: Board,
    /// Per-game state machine.
    phase: Phase,
    /// Results across games in this session.
    scoreboard: Scoreboard,
    /// Accepted moves of the game in progress.
    history: Vec<Move>,
    /// The automated player's choice during the last submission, if it moved.
    last_reply: Option<SearchResult>,
    #[getter(skip)]
    ended: bool,
}

/// Starts a new session in the given mode.
pub fn new_session(mode: GameMode) -> Session {
    Session::new(mode)
}

impl Session {
    /// Creates a session with an empty board, X to move and a blank scoreboard.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!(mode = mode.label(), "Starting session");
        Self {
            mode,
            board: Board::new(),
            phase: Phase::AwaitingMove(Side::X),
            scoreboard: Scoreboard::new(),
            history: Vec::new(),
            last_reply: None,
            ended: false,
        }
    }

    /// Side whose move is expected next.
    pub fn to_move(&self) -> Side {
        match self.phase {
            Phase::AwaitingMove(side) => side,
            Phase::GameOver(_) => Side::X,
        }
    }

    /// True once [`Session::end_session`] has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Plays the side to move at `(row, col)`.
    ///
    /// Out-of-range and occupied cells are refused with
    /// [`MoveResult::Rejected`] and leave the session untouched. A finished
    /// game is recorded on the scoreboard and the board is cleared before
    /// this returns. In player-vs-automated mode the automated reply is
    /// played within the same call; the returned outcome is the one after
    /// that reply, and [`Session::last_reply`] reports where it went.
    ///
    /// # Errors
    ///
    /// [`EngineError`] only when the automated player cannot produce a
    /// legal reply, which means an internal contract was broken.
    #[instrument(skip(self), fields(mode = self.mode.label(), side = %self.to_move()))]
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<MoveResult, EngineError> {
        if self.ended {
            warn!("Move submitted after session ended");
            return Ok(MoveResult::Rejected(RejectReason::SessionEnded));
        }

        self.last_reply = None;
        let side = self.to_move();
        let outcome = match self.apply(row, col, side) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(error = %err, "Move rejected");
                return Ok(MoveResult::Rejected(err.into()));
            }
        };

        match self.mode.automated_side() {
            Some(automated) if !outcome.is_terminal() && self.to_move() == automated => {
                self.play_automated(automated).map(MoveResult::Accepted)
            }
            _ => Ok(MoveResult::Accepted(outcome)),
        }
    }

    /// Searches and plays the automated side's move.
    fn play_automated(&mut self, side: Side) -> Result<Outcome, EngineError> {
        let reply = best_move(&self.board, side).inspect_err(|err| {
            error!(error = %err, "Automated player could not move");
        })?;
        let outcome = self
            .apply(reply.row(), reply.col(), side)
            .map_err(|err| {
                error!(error = %err, "Automated player chose an illegal cell");
                EngineError::IllegalReply(err)
            })?;
        info!(position = %reply.position(), value = reply.value(), "Automated player moved");
        self.last_reply = Some(reply);
        Ok(outcome)
    }

    /// Places a mark, classifies the board and advances the state machine.
    fn apply(&mut self, row: usize, col: usize, side: Side) -> Result<Outcome, BoardError> {
        let position =
            Position::from_row_col(row, col).ok_or(BoardError::OutOfRange { row, col })?;
        self.board.place(row, col, side)?;
        self.history.push(Move { side, position });
        debug_assert!(marks_alternate(&self.board), "turn alternation broken");

        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            self.phase = Phase::GameOver(outcome);
            self.finish(outcome);
        } else {
            self.phase = Phase::AwaitingMove(side.opponent());
            debug!(next = %side.opponent(), "Turn passed");
        }
        Ok(outcome)
    }

    /// Records a finished game and starts the next one.
    fn finish(&mut self, outcome: Outcome) {
        info!(%outcome, moves = self.history.len(), "Game over");
        self.scoreboard.tally(outcome);
        self.start_game();
    }

    fn start_game(&mut self) {
        self.board.clear();
        self.history.clear();
        self.phase = Phase::AwaitingMove(Side::X);
    }

    /// Clears the board and gives the move back to X. The scoreboard is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting board");
        self.start_game();
        self.last_reply = None;
    }

    /// Ends the session; every later move is rejected.
    #[instrument(skip(self))]
    pub fn end_session(&mut self) {
        info!(games = self.scoreboard.games(), "Ending session");
        self.ended = true;
    }

    /// Copies out the state a presentation layer needs to render.
    pub fn current_state(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            to_move: self.to_move(),
            scoreboard: self.scoreboard,
            mode: self.mode,
        }
    }
}

/// X has placed as many marks as O, or one more.
fn marks_alternate(board: &Board) -> bool {
    let x = board.count(Side::X);
    let o = board.count(Side::O);
    x == o || x == o + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_waits_for_x() {
        let session = Session::new(GameMode::PlayerVsPlayer);
        assert_eq!(session.phase(), &Phase::AwaitingMove(Side::X));
        assert_eq!(session.board(), &Board::new());
        assert!(session.history().is_empty());
        assert!(!session.is_ended());
    }

    #[test]
    fn test_turns_alternate_in_pvp() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        session.submit_move(0, 0).unwrap();
        assert_eq!(session.to_move(), Side::O);
        session.submit_move(1, 1).unwrap();
        assert_eq!(session.to_move(), Side::X);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].side(), &Side::O);
    }

    #[test]
    fn test_rejection_keeps_turn() {
        let mut session = Session::new(GameMode::PlayerVsPlayer);
        session.submit_move(0, 0).unwrap();
        let result = session.submit_move(0, 0).unwrap();
        assert_eq!(result, MoveResult::Rejected(RejectReason::CellOccupied));
        assert_eq!(session.to_move(), Side::O);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_board_error_maps_to_reason() {
        assert_eq!(
            RejectReason::from(BoardError::OutOfRange { row: 5, col: 0 }),
            RejectReason::OutOfRange
        );
        assert_eq!(
            RejectReason::from(BoardError::CellOccupied { row: 0, col: 0 }),
            RejectReason::CellOccupied
        );
    }

    #[test]
    fn test_alternation_check() {
        assert!(marks_alternate(&Board::new()));
        assert!(marks_alternate(&"X.. ... ...".parse().unwrap()));
        assert!(!marks_alternate(&"XX. ... ...".parse().unwrap()));
        assert!(!marks_alternate(&"O.. ... ...".parse().unwrap()));
    }
}
