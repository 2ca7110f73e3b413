// cursor.rs - Edit cursor, always kept inside the grid

use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// The centre cell of `grid`.
    pub fn centered(grid: &Grid) -> Self {
        Self { row: grid.height() / 2, col: grid.width() / 2 }
    }

    /// Moves one cell in `direction`, staying on the grid.
    pub fn moved(self, direction: Direction, grid: &Grid) -> Self {
        let (row, col) = match direction {
            Direction::Up    => (self.row.saturating_sub(1), self.col),
            Direction::Down  => (self.row.saturating_add(1), self.col),
            Direction::Left  => (self.row, self.col.saturating_sub(1)),
            Direction::Right => (self.row, self.col.saturating_add(1)),
        };
        Self { row, col }.clamped(grid)
    }

    /// Pulls the cursor back inside `grid`, e.g. after a load shrank it.
    pub fn clamped(self, grid: &Grid) -> Self {
        Self {
            row: self.row.min(grid.height() - 1),
            col: self.col.min(grid.width() - 1),
        }
    }
}
