//! Tests for the minimax opponent.

use tictactoe_core::search::{DRAW, O_WINS, game_value};
use tictactoe_core::{Board, Outcome, Position, SearchError, Side, best_move, evaluate};

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_forced_block() {
    // X threatens the right column; O has no line of its own.
    let board = board("..X .OX ...");
    let result = best_move(&board, Side::O).unwrap();
    assert_eq!(result.position(), &Position::BottomRight);
    assert_eq!((result.row(), result.col()), (2, 2));
}

#[test]
fn test_win_preferred_over_block() {
    // O can complete the middle row; blocking X's top row comes first in
    // scan order but is strictly worse.
    let board = board("XX. OO. X..");
    let result = best_move(&board, Side::O).unwrap();
    assert_eq!(result.position(), &Position::MiddleRight);
    assert_eq!(result.value(), &O_WINS);
    assert_eq!(result.predicted_outcome(), Outcome::Won(Side::O));
}

#[test]
fn test_x_side_minimises() {
    // X completes the top row rather than anything else.
    let board = board("XX. OO. ...");
    let result = best_move(&board, Side::X).unwrap();
    assert_eq!(result.position(), &Position::TopRight);
    assert_eq!(result.predicted_outcome(), Outcome::Won(Side::X));
}

#[test]
fn test_scan_order_tie_break_on_empty_board() {
    // Every opening move draws, so the first cell scanned wins the tie.
    let result = best_move(&Board::new(), Side::O).unwrap();
    assert_eq!(result.position(), &Position::TopLeft);
    assert_eq!(result.value(), &DRAW);
    assert!(result.nodes() > &0);
}

#[test]
fn test_search_leaves_board_untouched() {
    let original = board("X.. .O. ..X");
    let copy = original.clone();
    best_move(&original, Side::O).unwrap();
    assert_eq!(original, copy);
}

#[test]
fn test_perfect_play_draws() {
    assert_eq!(game_value(&Board::new(), Side::X), DRAW);

    let mut board = Board::new();
    let mut side = Side::X;
    while !evaluate(&board).is_terminal() {
        let choice = best_move(&board, side).unwrap();
        board.place(choice.row(), choice.col(), side).unwrap();
        side = side.opponent();
    }
    assert_eq!(evaluate(&board), Outcome::Draw);
}

#[test]
fn test_no_legal_move_on_decided_board() {
    let board = board("OOO XX. X..");
    assert_eq!(
        best_move(&board, Side::X),
        Err(SearchError::NoLegalMove {
            outcome: Outcome::Won(Side::O)
        })
    );
}
