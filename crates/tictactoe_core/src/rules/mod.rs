//! Game rules for tic-tac-toe.
//!
//! Pure functions classifying a board. They hold no state and cache
//! nothing, so they must be re-run after every placement.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use super::{Board, Outcome};

/// Classifies a board as won, drawn or still in progress.
///
/// Lines are checked in a fixed order (rows, columns, then the two
/// diagonals); a legal board can only ever hold one winner.
///
/// Not instrumented: the move search calls this at every node.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(side) = check_winner(board) {
        Outcome::Won(side)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_win_beats_full_board() {
        // Last mark completes a line and fills the board.
        let board: Board = "XOX OXO OXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Won(Side::X));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board: Board = "XO. .X. ..O".parse().unwrap();
        let first = evaluate(&board);
        assert_eq!(evaluate(&board), first);
        assert_eq!(first, Outcome::InProgress);
    }
}
