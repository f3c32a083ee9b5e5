//! Tests for board classification over every reachable position.

use std::collections::HashSet;
use tictactoe_core::{Board, Outcome, Position, Side, evaluate, rules};

/// Visits every board reachable from `board` by legal alternating play.
fn walk(board: &mut Board, to_move: Side, seen: &mut HashSet<Board>) {
    if !seen.insert(board.clone()) || evaluate(board).is_terminal() {
        return;
    }
    for pos in Position::ALL {
        if board.place(pos.row(), pos.col(), to_move).is_ok() {
            walk(board, to_move.opponent(), seen);
            *board = without(board, pos);
        }
    }
}

fn without(board: &Board, pos: Position) -> Board {
    let mut rebuilt = Board::new();
    for other in Position::ALL {
        if other == pos {
            continue;
        }
        if let Some(side) = board.at(other).side() {
            rebuilt.place(other.row(), other.col(), side).unwrap();
        }
    }
    rebuilt
}

fn reachable_boards() -> HashSet<Board> {
    let mut seen = HashSet::new();
    walk(&mut Board::new(), Side::X, &mut seen);
    seen
}

#[test]
fn test_reachable_position_count() {
    // Well-known count of distinct legal tic-tac-toe positions.
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_every_reachable_board_has_exactly_one_classification() {
    for board in reachable_boards() {
        let outcome = evaluate(&board);
        match outcome {
            Outcome::Won(side) => {
                assert_eq!(rules::check_winner(&board), Some(side));
                // The loser cannot also hold a line on a legally reached board.
                let lines_for_loser = rules::LINES
                    .iter()
                    .filter(|line| line.iter().all(|&p| board.at(p).side() == Some(side.opponent())))
                    .count();
                assert_eq!(lines_for_loser, 0, "two winners on\n{board}");
            }
            Outcome::Draw => {
                assert!(rules::is_full(&board));
                assert_eq!(rules::check_winner(&board), None);
            }
            Outcome::InProgress => {
                assert!(!rules::is_full(&board));
                assert_eq!(rules::check_winner(&board), None);
            }
        }
        assert_eq!(evaluate(&board), outcome, "evaluate must be idempotent");
    }
}

#[test]
fn test_line_order_rows_then_columns_then_diagonals() {
    assert_eq!(
        rules::LINES[0],
        [Position::TopLeft, Position::TopCenter, Position::TopRight]
    );
    assert_eq!(
        rules::LINES[3],
        [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]
    );
    assert_eq!(
        rules::LINES[7],
        [Position::TopRight, Position::Center, Position::BottomLeft]
    );
}
