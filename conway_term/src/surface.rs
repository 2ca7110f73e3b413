// surface.rs - Character drawing targets
//
// Canvas is the in-memory Surface used by tests and as the back buffer of
// TerminalSurface, which pushes it to the terminal on refresh.

use std::io::Stdout;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::error::TerminalError;

pub trait Surface {
    /// `(rows, cols)` available for drawing.
    fn size(&self) -> (u16, u16);
    fn clear(&mut self);
    /// Writes `text` starting at `(row, col)`, clipped at the right edge.
    /// Positions off the surface are ignored.
    fn write_text(&mut self, row: u16, col: u16, text: &str);
    /// Draws a single-line frame whose outer edge is the given rectangle.
    fn draw_box(&mut self, top: u16, left: u16, height: u16, width: u16);
    fn refresh(&mut self) -> Result<(), TerminalError>;
}

/// An in-memory character grid.
pub struct Canvas {
    buffer: Buffer,
}

impl Canvas {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { buffer: Buffer::empty(Rect::new(0, 0, cols, rows)) }
    }

    /// The characters on one row, trailing spaces included.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.buffer.area.width)
            .filter_map(|col| self.buffer.cell((col, row)))
            .map(|cell| cell.symbol())
            .collect()
    }

    /// The whole canvas, one line per row with trailing spaces trimmed.
    pub fn text(&self) -> String {
        (0..self.buffer.area.height)
            .map(|row| self.row_text(row).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u16, u16) {
        (self.buffer.area.height, self.buffer.area.width)
    }

    fn clear(&mut self) {
        self.buffer.reset();
    }

    fn write_text(&mut self, row: u16, col: u16, text: &str) {
        let area = self.buffer.area;
        if row >= area.height || col >= area.width {
            return;
        }
        let room = usize::from(area.width - col);
        self.buffer.set_stringn(col, row, text, room, Style::default());
    }

    fn draw_box(&mut self, top: u16, left: u16, height: u16, width: u16) {
        let frame = Rect::new(left, top, width, height).intersection(self.buffer.area);
        if frame.width >= 2 && frame.height >= 2 {
            Block::bordered().render(frame, &mut self.buffer);
        }
    }

    fn refresh(&mut self) -> Result<(), TerminalError> {
        Ok(())
    }
}

/// The live terminal, drawn through a [`Canvas`] back buffer.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    canvas: Canvas,
}

impl TerminalSurface {
    pub fn new(stdout: Stdout) -> Result<Self, TerminalError> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let size = terminal.size()?;
        Ok(Self { terminal, canvas: Canvas::new(size.height, size.width) })
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        self.canvas.size()
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn write_text(&mut self, row: u16, col: u16, text: &str) {
        self.canvas.write_text(row, col, text);
    }

    fn draw_box(&mut self, top: u16, left: u16, height: u16, width: u16) {
        self.canvas.draw_box(top, left, height, width);
    }

    fn refresh(&mut self) -> Result<(), TerminalError> {
        let Self { terminal, canvas } = self;
        terminal.draw(|frame| {
            let area = frame.area().intersection(canvas.buffer.area);
            let target = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (canvas.buffer.cell((x, y)), target.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }
}
