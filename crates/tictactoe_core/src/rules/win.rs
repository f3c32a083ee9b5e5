//! Win detection logic for tic-tac-toe.

use super::super::{Board, Position, Side};

/// The 8 winning lines in check order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(side)` for the first line (in [`LINES`] order) holding
/// three of the same mark, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Side> {
    LINES.iter().find_map(|&[a, b, c]| {
        let side = board.at(a).side()?;
        (board.at(b).side() == Some(side) && board.at(c).side() == Some(side)).then_some(side)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.place(0, 0, Side::X).unwrap();
        board.place(0, 1, Side::X).unwrap();
        board.place(0, 2, Side::X).unwrap();
        assert_eq!(check_winner(&board), Some(Side::X));
    }

    #[test]
    fn test_winner_column() {
        let board: Board = ".O. XOX .O.".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Side::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "X.O XO. O..".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Side::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX. .O. ...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XXO ... ...".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
