//! Error types for the tic-tac-toe engine.

use super::types::Outcome;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// Error returned by board queries and placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
pub enum BoardError {
    /// Row or column outside `0..=2`.
    #[display("Cell ({}, {}) is outside the 3x3 grid", row, col)]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, col)]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseBoardError {
    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unexpected character {:?} in board", found)]
    UnexpectedChar {
        /// The offending character.
        found: char,
    },

    /// Not exactly nine cells.
    #[display("Expected 9 cells, found {}", count)]
    WrongCellCount {
        /// Number of cells read.
        count: usize,
    },
}

/// Error returned by the move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// The board is already won or drawn, so there is nothing to choose.
    #[display("No legal move: board is already decided ({})", outcome)]
    NoLegalMove {
        /// Outcome of the board that was passed in.
        outcome: Outcome,
    },
}

/// Fault raised by a session when an internal contract is broken.
///
/// User mistakes (occupied or out-of-range cells) are never reported
/// through this type; they come back as rejected moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// The automated player was asked to move on a decided board.
    #[display("Move search failed: {}", _0)]
    Search(SearchError),

    /// The board refused the cell the automated player picked.
    #[display("Automated reply was illegal: {}", _0)]
    #[from(skip)]
    IllegalReply(BoardError),
}
