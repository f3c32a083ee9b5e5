//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Side {
    /// Side X (always moves first).
    X,
    /// Side O (moves second, automated in player-vs-automated mode).
    O,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::X => write!(f, "X"),
            Side::O => write!(f, "O"),
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a side's mark.
    Occupied(Side),
}

impl Cell {
    /// Returns true if no mark has been placed here.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the side holding this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(side) => Some(side),
        }
    }

    /// Single-character rendering: `X`, `O` or `.`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Side::X) => 'X',
            Cell::Occupied(Side::O) => 'O',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        Cell::Occupied(side)
    }
}

/// Classification of a board by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner yet and at least one empty cell.
    InProgress,
    /// Three in a row for the given side.
    Won(Side),
    /// Full board without a winner.
    Draw,
}

impl Outcome {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Won(side) => Some(side),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(side) => write!(f, "Player {} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Who supplies the moves for side O.
///
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Both sides' moves come from the caller.
    PlayerVsPlayer,
    /// X comes from the caller, O is computed by the move search.
    #[default]
    PlayerVsAutomated,
}

impl GameMode {
    /// The side played by the move search in this mode, if any.
    pub fn automated_side(self) -> Option<Side> {
        match self {
            GameMode::PlayerVsPlayer => None,
            GameMode::PlayerVsAutomated => Some(Side::O),
        }
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::PlayerVsAutomated => "Player vs AI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Side::X.opponent(), Side::O);
        assert_eq!(Side::O.opponent().opponent(), Side::O);
    }

    #[test]
    fn test_terminal_outcomes() {
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
        assert!(Outcome::Won(Side::X).is_terminal());
        assert_eq!(Outcome::Won(Side::O).winner(), Some(Side::O));
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_only_automated_mode_has_automated_side() {
        assert_eq!(GameMode::PlayerVsPlayer.automated_side(), None);
        assert_eq!(GameMode::PlayerVsAutomated.automated_side(), Some(Side::O));
    }
}
