// cli.rs - Command-line flags and the starting grid they describe

use std::path::PathBuf;

use clap::Parser;
use conway::patterns::{self, PATTERNS};
use conway::{BoundaryPolicy, Grid, snapshot};

use crate::controller::Options;
use crate::error::AppError;
use crate::state::DEFAULT_TICK_MS;

/// Grid shape when neither `--dimensions` nor a viewport says otherwise.
pub const DEFAULT_SHAPE: (usize, usize) = (50, 50);
pub const DEFAULT_RECORDING: &str = "output.gif";

#[derive(Debug, Parser)]
#[command(name = "conway", version, about = "Conway's Game of Life in the terminal")]
pub struct Cli {
    /// Load a saved snapshot at startup.
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Initial grid height and width, clamped to the viewport in curses mode.
    #[arg(long, num_args = 2, value_names = ["H", "W"])]
    pub dimensions: Option<Vec<usize>>,

    /// Run the interactive terminal interface instead of the headless runner.
    #[arg(long)]
    pub curses: bool,

    /// Wrap the grid edges into a torus.
    #[arg(long)]
    pub wrap: bool,

    /// Initial tick interval in milliseconds (30-5000).
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    pub interval_ms: u64,

    /// Where the recorded animation is written on exit.
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Headless only: generations to run before printing the grid.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub generations: u64,

    /// Stamp a named pattern in the middle of the starting grid.
    #[arg(long, value_name = "NAME")]
    pub pattern: Option<String>,

    /// Seed for the random fill.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here while the terminal interface is up.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn policy(&self) -> BoundaryPolicy {
        if self.wrap { BoundaryPolicy::Toroidal } else { BoundaryPolicy::Bounded }
    }

    pub fn record_path(&self) -> PathBuf {
        self.record.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDING))
    }

    pub fn options(&self) -> Options {
        Options {
            policy: self.policy(),
            tick_interval_ms: self.interval_ms,
            record_path: self.record_path(),
            seed: self.seed,
        }
    }

    /// Builds the starting grid. A loaded snapshot keeps its own shape;
    /// otherwise `--dimensions` (or `bounds`, or [`DEFAULT_SHAPE`]) is used,
    /// each side clamped to `1..=bounds`.
    pub fn initial_grid(&self, bounds: Option<(usize, usize)>) -> Result<Grid, AppError> {
        let mut grid = match &self.load {
            Some(path) => snapshot::load(path)?,
            None => {
                let (height, width) = match self.dimensions.as_deref() {
                    Some(&[h, w]) => (h, w),
                    _ => bounds.unwrap_or(DEFAULT_SHAPE),
                };
                let (max_h, max_w) = bounds.unwrap_or((usize::MAX, usize::MAX));
                Grid::new(height.clamp(1, max_h.max(1)), width.clamp(1, max_w.max(1)))?
            }
        };

        if let Some(name) = &self.pattern {
            let pattern = patterns::find(name).ok_or_else(|| AppError::UnknownPattern {
                name: name.clone(),
                choices: PATTERNS.iter().map(|p| p.name).collect::<Vec<_>>().join(", "),
            })?;
            let (row, col) = (grid.height() / 2, grid.width() / 2);
            patterns::stamp(&mut grid, pattern, row, col);
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("conway").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert!(!cli.curses);
        assert_eq!(cli.policy(), BoundaryPolicy::Bounded);
        assert_eq!(cli.interval_ms, 100);
        assert_eq!(cli.record_path(), PathBuf::from("output.gif"));
        let grid = cli.initial_grid(None).unwrap();
        assert_eq!((grid.height(), grid.width()), DEFAULT_SHAPE);
    }

    #[test]
    fn dimensions_are_clamped_to_the_viewport() {
        let cli = parse(&["--dimensions", "500", "0", "--wrap", "--curses"]);
        assert_eq!(cli.policy(), BoundaryPolicy::Toroidal);
        let grid = cli.initial_grid(Some((20, 60))).unwrap();
        assert_eq!((grid.height(), grid.width()), (20, 1));
        let viewport_sized = parse(&["--curses"]).initial_grid(Some((20, 60))).unwrap();
        assert_eq!((viewport_sized.height(), viewport_sized.width()), (20, 60));
    }

    #[test]
    fn dimensions_need_two_values() {
        assert!(Cli::try_parse_from(["conway", "--dimensions", "5"]).is_err());
    }

    #[test]
    fn pattern_is_stamped_in_the_middle() {
        let cli = parse(&["--dimensions", "5", "5", "--pattern", "blinker"]);
        let grid = cli.initial_grid(None).unwrap();
        assert_eq!(grid.row_text(2, 0..5), " OOO ");
        let err = parse(&["--pattern", "nope"]).initial_grid(None).unwrap_err();
        assert!(err.to_string().contains("Glider"));
    }
}
