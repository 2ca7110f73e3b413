// patterns.rs - Named starting patterns, stored as offsets from their top-left corner

use crate::grid::Grid;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Rows and columns spanned by the pattern.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top section
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom section (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 1), (1, 2), (0, 2), (2, 1), (2, 0)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Looks a pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Sets the pattern's cells alive with its centre on `(row, col)`.
/// Cells falling outside the grid are dropped. Returns how many were placed.
pub fn stamp(grid: &mut Grid, pattern: &Pattern, row: usize, col: usize) -> usize {
    let (h, w) = pattern.extent();
    let (top, left) = (row as isize - (h / 2) as isize, col as isize - (w / 2) as isize);
    let mut placed = 0;
    for &(r, c) in pattern.cells {
        let (r, c) = (top + r as isize, left + c as isize);
        if r < 0 || c < 0 { continue; }
        if grid.set(r as usize, c as usize, true).is_ok() { placed += 1; }
    }
    placed
}
