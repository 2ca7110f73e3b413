// render.rs - Boxed viewport for the grid, plus the banner text above it

use conway::{Cursor, Grid};

use crate::error::TerminalError;
use crate::surface::Surface;

/// Rows and columns left free around the grid box on every side.
pub const MARGIN: u16 = 5;
pub const CURSOR_GLYPH: &str = "█";

const TITLE: &str = "Conway's Game of Life";
const MAIN_HELP: [&str; 2] = [
    "Press e to enter edit mode, press r to start the game, p to pause, q to quit.",
    "Press g to speed up, h to slow down, v to start or stop recording.",
];
const EDIT_HELP: [&str; 3] = [
    "Move with w s a d keys, press z to create a cell, x to clear a cell, f to fill all and c to clear all.",
    "Press o to output the current cell pattern to a file, l to load a saved pattern, and q to exit.",
    "Press n to fill the screen randomly, t to stamp the pattern at the cursor, y to pick the next pattern.",
];

/// The interior of the grid box, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: u16,
    pub left: u16,
    pub height: u16,
    pub width: u16,
}

impl Viewport {
    /// The box sits centred on the screen with [`MARGIN`] free on each side;
    /// its one-cell border is not part of the viewport.
    pub fn for_screen(rows: u16, cols: u16) -> Result<Self, TerminalError> {
        let min = 2 * MARGIN + 3;
        if rows < min || cols < min {
            return Err(TerminalError::TooSmall { rows, cols, min_rows: min, min_cols: min });
        }
        Ok(Self {
            top: MARGIN + 1,
            left: MARGIN + 1,
            height: rows - 2 * MARGIN - 2,
            width: cols - 2 * MARGIN - 2,
        })
    }
}

/// First grid row/column shown: the centres line up, floored at 0 when the
/// grid is the smaller of the two.
pub fn window_offset(grid_len: usize, view_len: usize) -> usize {
    (grid_len / 2)
        .saturating_sub(view_len / 2)
        .min(grid_len.saturating_sub(view_len))
}

/// The text of every viewport row, each exactly `width` characters wide.
/// Parts of the viewport the grid does not reach are spaces.
pub fn visible_rows(grid: &Grid, height: usize, width: usize) -> Vec<String> {
    let (top, left) = (window_offset(grid.height(), height), window_offset(grid.width(), width));
    (0..height)
        .map(|i| {
            let mut text = grid.row_text(top + i, left..left + width);
            let pad = width - text.chars().count();
            text.extend(std::iter::repeat_n(' ', pad));
            text
        })
        .collect()
}

/// Draws the box, the visible part of the grid, and the cursor when it is
/// inside the visible window.
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, viewport: Viewport, grid: &Grid, cursor: Option<Cursor>) {
    let (height, width) = (usize::from(viewport.height), usize::from(viewport.width));
    surface.draw_box(
        viewport.top.saturating_sub(1),
        viewport.left.saturating_sub(1),
        viewport.height.saturating_add(2),
        viewport.width.saturating_add(2),
    );
    for (i, row) in visible_rows(grid, height, width).iter().enumerate() {
        surface.write_text(viewport.top + i as u16, viewport.left, row);
    }

    let Some(cursor) = cursor else { return };
    let (top, left) = (window_offset(grid.height(), height), window_offset(grid.width(), width));
    let visible_rows = top..(top + height).min(grid.height());
    let visible_cols = left..(left + width).min(grid.width());
    if visible_rows.contains(&cursor.row) && visible_cols.contains(&cursor.col) {
        let row = viewport.top + (cursor.row - top) as u16;
        let col = viewport.left + (cursor.col - left) as u16;
        surface.write_text(row, col, CURSOR_GLYPH);
    }
}

/// Numbers shown on the main banner's status line.
#[derive(Debug, Clone, Copy)]
pub struct Status<'a> {
    pub generation: u64,
    pub live: usize,
    pub tick_interval_ms: u64,
    pub running: bool,
    pub recording: bool,
    pub message: Option<&'a str>,
}

pub fn draw_main_banner<S: Surface + ?Sized>(surface: &mut S, status: &Status<'_>) {
    surface.write_text(0, 0, TITLE);
    let mut line = format!(
        "Generation {} | Live cells {} | {}ms | {}",
        status.generation,
        status.live,
        status.tick_interval_ms,
        if status.running { "running" } else { "paused" },
    );
    if status.recording {
        line.push_str(" | REC");
    }
    if let Some(message) = status.message {
        line.push_str(" | ");
        line.push_str(message);
    }
    surface.write_text(1, 0, &line);
    for (i, help) in MAIN_HELP.iter().enumerate() {
        surface.write_text(2 + i as u16, 0, help);
    }
}

pub fn draw_edit_banner<S: Surface + ?Sized>(surface: &mut S, pattern: &str, message: Option<&str>) {
    surface.write_text(0, 0, TITLE);
    let mut line = format!("Edit Mode. Pattern: {pattern}.");
    if let Some(message) = message {
        line.push(' ');
        line.push_str(message);
    }
    surface.write_text(1, 0, &line);
    for (i, help) in EDIT_HELP.iter().enumerate() {
        surface.write_text(2 + i as u16, 0, help);
    }
}
