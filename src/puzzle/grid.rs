//! Grid representation for trap/gem puzzles

use super::topology;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest clue a cell can carry (size of the Moore neighbourhood)
pub const MAX_CLUE: u8 = 8;

/// Grid coordinate as (row, col)
pub type Coord = (usize, usize);

/// State of a single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// Known count of traps among the neighbours
    Clue(u8),
    /// Undetermined cell, decided by the solver
    Unknown,
    /// Trap, either given in the input or resolved
    Trap,
    /// Gem, either given in the input or resolved
    Gem,
    /// Any other symbol; carried through untouched
    Opaque(String),
}

impl Cell {
    /// Whether this cell gets a decision variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Cell::Unknown | Cell::Trap | Cell::Gem)
    }

    pub fn clue(&self) -> Option<u8> {
        match self {
            Cell::Clue(k) => Some(*k),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Clue(k) => write!(f, "{}", k),
            Cell::Unknown => write!(f, "_"),
            Cell::Trap => write!(f, "T"),
            Cell::Gem => write!(f, "G"),
            Cell::Opaque(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// Structural problems that reject a grid before any encoding happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has no cells")]
    EmptyRow { row: usize },
    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("grid declares {rows}x{cols} but holds {cells} cells")]
    CellCount { rows: usize, cols: usize, cells: usize },
    /// `value` is the clue as written, which may not fit any integer type
    #[error("clue {value} at ({row}, {col}) exceeds the maximum of 8")]
    ClueOutOfRange { row: usize, col: usize, value: String },
}

/// Rectangular puzzle grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridLayout")]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Cell>,
}

/// Unchecked wire form of a grid; deserialising goes through `Grid::validate`
#[derive(Deserialize)]
struct GridLayout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridLayout> for Grid {
    type Error = GridError;

    fn try_from(layout: GridLayout) -> Result<Self, Self::Error> {
        let grid = Grid {
            rows: layout.rows,
            cols: layout.cols,
            cells: layout.cells,
        };
        grid.validate()?;
        Ok(grid)
    }
}

impl Grid {
    /// Create a grid from a 2D array of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let width = rows[0].len();

        for (row, cells) in rows.iter().enumerate() {
            if cells.is_empty() {
                return Err(GridError::EmptyRow { row });
            }
            if cells.len() != width {
                return Err(GridError::RaggedRow { row, len: cells.len(), expected: width });
            }
        }

        let grid = Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check the structural invariants: non-empty, `cells` matches the
    /// declared shape, and every clue is at most `MAX_CLUE`.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows == 0 {
            return Err(GridError::Empty);
        }
        if self.cols == 0 {
            return Err(GridError::EmptyRow { row: 0 });
        }
        if self.cells.len() != self.rows * self.cols {
            return Err(GridError::CellCount {
                rows: self.rows,
                cols: self.cols,
                cells: self.cells.len(),
            });
        }

        match self.iter().find(|(_, cell)| matches!(cell, Cell::Clue(k) if *k > MAX_CLUE)) {
            Some(((row, col), cell)) => Err(GridError::ClueOutOfRange { row, col, value: cell.to_string() }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the cell at coordinates, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    /// Iterate over every cell with its coordinate, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / self.cols, i % self.cols), cell))
    }

    /// Moore neighbours of a cell that lie inside the grid
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<Coord> {
        topology::neighbors(row, col, self.rows, self.cols)
    }

    /// Count neighbours of a cell that satisfy a predicate
    pub fn count_neighbors<F>(&self, row: usize, col: usize, predicate: F) -> usize
    where
        F: Fn(&Cell) -> bool,
    {
        self.neighbors(row, col)
            .into_iter()
            .filter_map(|(r, c)| self.get(r, c))
            .filter(|cell| predicate(cell))
            .count()
    }

    pub fn count(&self, cell: &Cell) -> usize {
        self.cells.iter().filter(|&c| c == cell).count()
    }

    pub fn unknown_count(&self) -> usize {
        self.count(&Cell::Unknown)
    }

    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|c| c.clue().is_some()).count()
    }

    /// Whether no `Unknown` cells remain
    pub fn is_resolved(&self) -> bool {
        self.unknown_count() == 0
    }

    /// Rows as slices, for formatting
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(", "))?;
        }
        Ok(())
    }
}
