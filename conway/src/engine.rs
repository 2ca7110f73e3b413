// engine.rs - Next-generation computation under the B3/S23 rule

use rand::Rng;

use crate::error::GridError;
use crate::grid::Grid;

/// How neighbours past the grid edge are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Cells outside the grid are absent.
    #[default]
    Bounded,
    /// Edges wrap around, top to bottom and left to right.
    Toroidal,
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Live cells in the Moore neighbourhood of `(row, col)`, excluding the cell itself.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize, policy: BoundaryPolicy) -> u8 {
    let (height, width) = (grid.height() as isize, grid.width() as isize);
    let mut count = 0;
    for &(dr, dc) in &NEIGHBOR_OFFSETS {
        let (r, c) = (row as isize + dr, col as isize + dc);
        let (r, c) = match policy {
            BoundaryPolicy::Bounded => {
                if r < 0 || r >= height || c < 0 || c >= width { continue; }
                (r, c)
            }
            BoundaryPolicy::Toroidal => (r.rem_euclid(height), c.rem_euclid(width)),
        };
        if grid.get(r as usize, c as usize) { count += 1; }
    }
    count
}

/// The Life rule for one cell.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Computes the next generation into a fresh grid; `grid` is never modified.
pub fn step(grid: &Grid, policy: BoundaryPolicy) -> Grid {
    grid.map_cells(|row, col, alive| next_state(alive, live_neighbors(grid, row, col, policy)))
}

/// A grid where each cell is alive with probability one half.
pub fn randomize<R: Rng + ?Sized>(height: usize, width: usize, rng: &mut R) -> Result<Grid, GridError> {
    let cells = (0..height.saturating_mul(width)).map(|_| rng.random_bool(0.5)).collect();
    Grid::from_cells(height, width, cells)
}
