//! The 8x8 board of digits and primitive position queries.

use crate::rng::SimpleRng;
use serde::{Deserialize, Serialize};

/// Board side length.
pub const GRID_SIZE: usize = 8;
/// Smallest value a cell can hold. Zero cells are deliberately excluded so
/// division candidates stay meaningful during generation.
pub const MIN_CELL_VALUE: u8 = 1;
/// Largest value a cell can hold.
pub const MAX_CELL_VALUE: u8 = 9;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All board positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }

    /// True iff the two cells share an edge (Manhattan distance 1).
    pub fn is_adjacent(&self, other: Position) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let col_diff = self.col.abs_diff(other.col);
        (row_diff == 1 && col_diff == 0) || (row_diff == 0 && col_diff == 1)
    }

    /// In-bounds orthogonal neighbors in the fixed order up, down, left,
    /// right. Path enumeration relies on this order being stable.
    pub fn neighbors(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        if self.row > 0 {
            out.push(Position::new(self.row - 1, self.col));
        }
        if self.row + 1 < GRID_SIZE {
            out.push(Position::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            out.push(Position::new(self.row, self.col - 1));
        }
        if self.col + 1 < GRID_SIZE {
            out.push(Position::new(self.row, self.col + 1));
        }
        out
    }
}

/// The board. Mutated only by full re-randomization and by edit-mode swaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create a board filled with fresh random digits.
    pub fn random(rng: &mut SimpleRng) -> Self {
        let mut grid = Self {
            cells: [[MIN_CELL_VALUE; GRID_SIZE]; GRID_SIZE],
        };
        grid.randomize(rng);
        grid
    }

    /// Build a board from explicit values. Used by tests and save restore.
    pub fn from_values(cells: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn value(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Snapshot of all cell values for the view layer.
    pub fn values(&self) -> [[u8; GRID_SIZE]; GRID_SIZE] {
        self.cells
    }

    /// Replace every cell with a fresh uniform draw. No partial retention.
    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for pos in Position::all() {
            self.cells[pos.row][pos.col] = rng.next_range(MIN_CELL_VALUE, MAX_CELL_VALUE);
        }
    }

    /// Exchange the values of two cells (edit-mode move).
    pub fn swap(&mut self, a: Position, b: Position) {
        let tmp = self.cells[a.row][a.col];
        self.cells[a.row][a.col] = self.cells[b.row][b.col];
        self.cells[b.row][b.col] = tmp;
    }
}
