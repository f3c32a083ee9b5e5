//! The 3x3 grid of cells.

use super::error::{BoardError, ParseBoardError};
use super::position::Position;
use super::types::{Cell, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// 3x3 tic-tac-toe board.
///
/// The only public mutations are [`Board::place`], which refuses to
/// overwrite a mark, and [`Board::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order.
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] when either coordinate is outside `0..=2`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(BoardError::OutOfRange { row, col })
    }

    /// Returns the cell at a named position.
    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Places `side`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`BoardError::OutOfRange`] when either coordinate is outside `0..=2`.
    /// - [`BoardError::CellOccupied`] when the cell already holds a mark.
    ///
    /// The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, side: Side) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::OutOfRange { row, col })?;

        if !cell.is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }

        *cell = Cell::Occupied(side);
        Ok(())
    }

    /// Resets every cell to empty.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; 3]; 3];
    }

    /// Empties a cell again. Only the move search uses this, to undo its
    /// own trial placements.
    pub(crate) fn vacate(&mut self, pos: Position) {
        self.cells[pos.row()][pos.col()] = Cell::Empty;
    }

    /// Writes a mark without the occupancy check; caller guarantees the
    /// cell is empty.
    pub(crate) fn mark(&mut self, pos: Position, side: Side) {
        debug_assert!(self.at(pos).is_empty());
        self.cells[pos.row()][pos.col()] = Cell::Occupied(side);
    }

    /// Checks if the cell at a position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.at(pos).is_empty()
    }

    /// Rows of cells, top to bottom.
    pub fn cells(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Empty positions in row-major scan order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|&pos| self.is_empty(pos))
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Number of marks placed by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.side() == Some(side))
            .count()
    }

    /// The side whose turn it is if X moved first and turns alternated.
    pub fn side_to_move(&self) -> Side {
        if self.count(Side::X) > self.count(Side::O) {
            Side::O
        } else {
            Side::X
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            let symbols: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            write!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    /// Reads nine cells in row-major order.
    ///
    /// `X`/`O` (any case) are marks, `.`, `-` and `_` are empty cells.
    /// Whitespace, `|` and `/` are separators. Grid rules such as the
    /// `-+-+-` line `Display` prints are skipped, so both
    /// `"XO./.X./..O"` and the output of `Display` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(9);
        for line in s.lines().filter(|line| !is_rule_line(line)) {
            for ch in line.chars() {
                let cell = match ch {
                    'X' | 'x' => Cell::Occupied(Side::X),
                    'O' | 'o' => Cell::Occupied(Side::O),
                    '.' | '-' | '_' => Cell::Empty,
                    c if c.is_whitespace() || matches!(c, '|' | '/') => continue,
                    found => return Err(ParseBoardError::UnexpectedChar { found }),
                };
                cells.push(cell);
            }
        }

        if cells.len() != 9 {
            return Err(ParseBoardError::WrongCellCount { count: cells.len() });
        }

        let mut board = Board::new();
        for (pos, cell) in Position::ALL.into_iter().zip(cells) {
            board.cells[pos.row()][pos.col()] = cell;
        }
        Ok(board)
    }
}

/// A grid rule needs a `+`; a bare `---` is a row of empty cells.
fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    line.contains('+') && line.chars().all(|c| matches!(c, '-' | '+'))
}
