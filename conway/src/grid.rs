// grid.rs - Grid type for Conway's Game of Life

use crate::error::GridError;

/// Glyph used for a live cell wherever a grid is shown as text.
pub const LIVE_GLYPH: char = 'O';
/// Glyph used for a dead cell.
pub const DEAD_GLYPH: char = ' ';

/// A fixed-size rectangular matrix of cells, stored row-major.
///
/// The shape is fixed at construction. `fill` replaces contents but never
/// the shape; replacing the shape means building a new `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid of the given shape.
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::Degenerate { height, width });
        }
        Ok(Self { height, width, cells: vec![false; height * width] })
    }

    /// Builds a grid from row-major cell data.
    pub fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::Degenerate { height, width });
        }
        let expected = height.checked_mul(width).ok_or(GridError::Degenerate { height, width })?;
        if cells.len() != expected {
            return Err(GridError::ShapeMismatch { expected, actual: cells.len() });
        }
        Ok(Self { height, width, cells })
    }

    /// Parses rows of text where `O` marks a live cell and anything else is dead.
    /// All rows must have the same length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars().map(|c| c == LIVE_GLYPH));
            if cells.len() - before != width {
                return Err(GridError::ShapeMismatch { expected: width, actual: cells.len() - before });
            }
        }
        Self::from_cells(height, width, cells)
    }

    pub fn height(&self) -> usize { self.height }
    pub fn width(&self) -> usize { self.width }

    /// Cell value; anything outside the grid reads as dead.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds { row, col, height: self.height, width: self.width });
        }
        self.cells[row * self.width + col] = alive;
        Ok(())
    }

    /// Sets every cell to `alive`, keeping the shape.
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }

    /// A grid of the same shape whose cell at `(row, col)` is
    /// `f(row, col, alive)`.
    pub(crate) fn map_cells(&self, mut f: impl FnMut(usize, usize, bool) -> bool) -> Grid {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &alive)| f(i / self.width, i % self.width, alive))
            .collect();
        Grid { height: self.height, width: self.width, cells }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    /// Text form of one row, `O` for live and space for dead.
    /// Columns past the right edge are dropped.
    pub fn row_text(&self, row: usize, cols: std::ops::Range<usize>) -> String {
        let end = cols.end.min(self.width);
        (cols.start.min(end)..end)
            .map(|col| if self.get(row, col) { LIVE_GLYPH } else { DEAD_GLYPH })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!((grid.height(), grid.width()), (3, 4));
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn degenerate_shapes_are_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(GridError::Degenerate { .. })));
        assert!(matches!(Grid::new(4, 0), Err(GridError::Degenerate { .. })));
        assert!(matches!(
            Grid::from_cells(2, 2, vec![true; 3]),
            Err(GridError::ShapeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn set_outside_is_an_error_and_get_outside_is_dead() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(matches!(grid.set(2, 0, true), Err(GridError::OutOfBounds { .. })));
        grid.set(1, 1, true).unwrap();
        assert!(grid.get(1, 1));
        assert!(!grid.get(5, 5));
    }

    #[test]
    fn fill_keeps_shape() {
        let mut grid = Grid::new(3, 5).unwrap();
        grid.fill(true);
        assert_eq!(grid.live_count(), 15);
        grid.fill(false);
        assert!(grid.is_empty());
        assert_eq!((grid.height(), grid.width()), (3, 5));
    }

    #[test]
    fn map_cells_keeps_shape_and_sees_coordinates() {
        let grid = Grid::from_rows(&["O..", "..O"]).unwrap();
        let mut seen = Vec::new();
        let flipped = grid.map_cells(|row, col, alive| {
            seen.push((row, col));
            !alive
        });
        assert_eq!((flipped.height(), flipped.width()), (2, 3));
        assert_eq!(flipped.row_text(0, 0..3), " OO");
        assert_eq!(flipped.row_text(1, 0..3), "OO ");
        assert_eq!(seen, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn rows_parse_and_print() {
        let grid = Grid::from_rows(&[".O.", "OO.", "..O"]).unwrap();
        assert_eq!(grid.live_count(), 4);
        assert_eq!(grid.row_text(1, 0..3), "OO ");
        assert_eq!(grid.row_text(1, 1..10), "O ");
        assert!(Grid::from_rows(&["..", "..."]).is_err());
    }
}
