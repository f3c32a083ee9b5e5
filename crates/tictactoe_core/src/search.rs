//! Exhaustive minimax search for the automated player.
//!
//! Scores are always from O's point of view: `+1` O wins, `-1` X wins,
//! `0` draw. O maximises and X minimises; the value is never re-signed
//! between plies. The whole tree is searched with no pruning, which is
//! cheap on a 3x3 board.

use super::error::SearchError;
use super::rules::evaluate;
use super::{Board, Outcome, Position, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, error, instrument};

/// Value of a board won by O.
pub const O_WINS: i8 = 1;
/// Value of a drawn board.
pub const DRAW: i8 = 0;
/// Value of a board won by X.
pub const X_WINS: i8 = -1;

/// The move chosen by [`best_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SearchResult {
    /// Chosen cell.
    position: Position,
    /// Game value after the move under optimal play, from O's point of view.
    value: i8,
    /// Number of positions visited.
    nodes: u64,
}

impl SearchResult {
    /// Row of the chosen cell.
    pub fn row(&self) -> usize {
        self.position.row()
    }

    /// Column of the chosen cell.
    pub fn col(&self) -> usize {
        self.position.col()
    }

    /// The outcome both sides are heading for if they keep playing perfectly.
    pub fn predicted_outcome(&self) -> Outcome {
        match self.value {
            O_WINS => Outcome::Won(Side::O),
            X_WINS => Outcome::Won(Side::X),
            _ => Outcome::Draw,
        }
    }
}

/// Picks the optimal move for `side_to_move`.
///
/// Empty cells are tried in row-major order and the first cell reaching
/// the best value for the mover is kept; later cells only replace it when
/// strictly better. The caller's board is never modified.
///
/// # Errors
///
/// Returns [`SearchError::NoLegalMove`] when the board is already won or
/// drawn. Callers are expected to run [`evaluate`] first.
#[instrument(skip(board), fields(empty = board.empty_cells().count()))]
pub fn best_move(board: &Board, side_to_move: Side) -> Result<SearchResult, SearchError> {
    let outcome = evaluate(board);
    if outcome.is_terminal() {
        error!(?outcome, "Move search invoked on a decided board");
        return Err(SearchError::NoLegalMove { outcome });
    }

    let mut search = Minimax::new(board.clone());
    let mut best: Option<(Position, i8)> = None;

    for pos in Position::ALL {
        if !search.board.is_empty(pos) {
            continue;
        }
        let value = search.play(pos, side_to_move).value(side_to_move.opponent());
        if best.is_none_or(|(_, best_value)| improves(side_to_move, value, best_value)) {
            best = Some((pos, value));
        }
    }

    let (position, value) = best.ok_or(SearchError::NoLegalMove { outcome })?;
    let result = SearchResult {
        position,
        value,
        nodes: search.nodes,
    };
    debug!(
        side = %side_to_move,
        position = %result.position,
        value = result.value,
        nodes = result.nodes,
        "Search complete"
    );
    Ok(result)
}

/// Minimax value of `board` with `to_move` on move, from O's point of view.
///
/// Decided boards return their terminal score directly.
#[instrument(skip(board))]
pub fn game_value(board: &Board, to_move: Side) -> i8 {
    Minimax::new(board.clone()).value(to_move)
}

/// Terminal score of an outcome, `None` while the game is in progress.
pub fn terminal_score(outcome: Outcome) -> Option<i8> {
    match outcome {
        Outcome::Won(Side::O) => Some(O_WINS),
        Outcome::Won(Side::X) => Some(X_WINS),
        Outcome::Draw => Some(DRAW),
        Outcome::InProgress => None,
    }
}

/// True when `candidate` is strictly better than `current` for `side`.
fn improves(side: Side, candidate: i8, current: i8) -> bool {
    match side {
        Side::O => candidate > current,
        Side::X => candidate < current,
    }
}

/// Working state for one search: a private board copy plus a node counter.
struct Minimax {
    board: Board,
    nodes: u64,
}

impl Minimax {
    fn new(board: Board) -> Self {
        Self { board, nodes: 0 }
    }

    /// Places a trial mark; it is removed again when the guard drops.
    fn play(&mut self, pos: Position, side: Side) -> Trial<'_> {
        self.board.mark(pos, side);
        Trial { search: self, pos }
    }

    fn value(&mut self, to_move: Side) -> i8 {
        self.nodes += 1;
        if let Some(score) = terminal_score(evaluate(&self.board)) {
            return score;
        }

        let mut best = match to_move {
            Side::O => i8::MIN,
            Side::X => i8::MAX,
        };
        for pos in Position::ALL {
            if !self.board.is_empty(pos) {
                continue;
            }
            let value = self.play(pos, to_move).value(to_move.opponent());
            best = match to_move {
                Side::O => best.max(value),
                Side::X => best.min(value),
            };
        }
        best
    }
}

/// Scope guard for a trial placement.
struct Trial<'a> {
    search: &'a mut Minimax,
    pos: Position,
}

impl Deref for Trial<'_> {
    type Target = Minimax;

    fn deref(&self) -> &Minimax {
        &*self.search
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Minimax {
        &mut *self.search
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.search.board.vacate(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decided_board_has_no_move() {
        let won: Board = "XXX OO. ...".parse().unwrap();
        assert_eq!(
            best_move(&won, Side::O),
            Err(SearchError::NoLegalMove {
                outcome: Outcome::Won(Side::X)
            })
        );

        let drawn: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(
            best_move(&drawn, Side::O),
            Err(SearchError::NoLegalMove {
                outcome: Outcome::Draw
            })
        );
    }

    #[test]
    fn test_trial_guard_restores_cell() {
        let mut search = Minimax::new(Board::new());
        {
            let trial = search.play(Position::Center, Side::O);
            assert!(!trial.board.is_empty(Position::Center));
        }
        assert_eq!(search.board, Board::new());
    }

    #[test]
    fn test_value_of_search_board_is_restored() {
        let board: Board = "X.. .O. ..X".parse().unwrap();
        let mut search = Minimax::new(board.clone());
        search.value(Side::O);
        assert_eq!(search.board, board);
        assert!(search.nodes > 1);
    }

    #[test]
    fn test_terminal_scores() {
        assert_eq!(terminal_score(Outcome::Won(Side::O)), Some(O_WINS));
        assert_eq!(terminal_score(Outcome::Won(Side::X)), Some(X_WINS));
        assert_eq!(terminal_score(Outcome::Draw), Some(DRAW));
        assert_eq!(terminal_score(Outcome::InProgress), None);
    }

    #[test]
    fn test_single_empty_cell() {
        // X O X / X O O / O X .  -> only (2,2) is left
        let board: Board = "XOX XOO OX.".parse().unwrap();
        let result = best_move(&board, Side::X).unwrap();
        assert_eq!(result.position(), &Position::BottomRight);
        assert_eq!(result.predicted_outcome(), Outcome::Draw);
        assert_eq!(result.nodes(), &1);
    }
}
