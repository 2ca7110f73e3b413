// headless.rs - No-terminal runner: step a fixed number of generations, print the result

use std::io::Write;
use std::path::PathBuf;

use conway::{BoundaryPolicy, FrameRecorder, Grid};
use tracing::info;

use crate::error::{AppError, TerminalError};

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub policy: BoundaryPolicy,
    pub generations: u64,
    pub tick_interval_ms: u64,
    /// Capture every generation (the starting grid included) and write them here.
    pub record: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub generations: u64,
    pub live: usize,
    pub frames: usize,
}

pub fn run<W: Write>(mut grid: Grid, options: &HeadlessOptions, out: &mut W) -> Result<(Grid, Report), AppError> {
    let mut recorder = FrameRecorder::new();
    let recording = options.record.is_some();
    if recording {
        recorder.capture(&grid, options.tick_interval_ms);
    }

    for _ in 0..options.generations {
        grid = conway::step(&grid, options.policy);
        if recording {
            recorder.capture(&grid, options.tick_interval_ms);
        }
    }

    let frames = match &options.record {
        Some(path) => recorder.flush(path)?,
        None => 0,
    };
    let report = Report { generations: options.generations, live: grid.live_count(), frames };
    print_grid(&grid, &report, out).map_err(TerminalError::from)?;
    info!(generations = report.generations, live = report.live, frames = report.frames, "headless run completed");
    Ok((grid, report))
}

fn print_grid<W: Write>(grid: &Grid, report: &Report, out: &mut W) -> std::io::Result<()> {
    for row in 0..grid.height() {
        writeln!(out, "{}", grid.row_text(row, 0..grid.width()))?;
    }
    writeln!(out, "generation {} | live cells {}", report.generations, report.live)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options(generations: u64) -> HeadlessOptions {
        HeadlessOptions { policy: BoundaryPolicy::Bounded, generations, tick_interval_ms: 100, record: None }
    }

    #[test]
    fn prints_the_final_grid() {
        let grid = Grid::from_rows(&[".O.", ".O.", ".O."]).unwrap();
        let mut out = Vec::new();
        let (grid, report) = run(grid, &options(1), &mut out).unwrap();
        assert_eq!(report, Report { generations: 1, live: 3, frames: 0 });
        assert_eq!(grid.row_text(1, 0..3), "OOO");
        assert_eq!(String::from_utf8(out).unwrap(), "   \nOOO\n   \ngeneration 1 | live cells 3\n");
    }

    #[test]
    fn records_every_generation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.gif");
        let grid = Grid::from_rows(&[".O.", ".O.", ".O."]).unwrap();
        let opts = HeadlessOptions { record: Some(path.clone()), ..options(4) };
        let (_, report) = run(grid, &opts, &mut Vec::new()).unwrap();
        assert_eq!(report.frames, 5);
        assert!(path.exists());
    }
}
