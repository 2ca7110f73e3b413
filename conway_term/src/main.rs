// main.rs - Conway's Game of Life, in the terminal or headless

use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use conway_term::cli::Cli;
use conway_term::controller::Controller;
use conway_term::headless::{self, HeadlessOptions};
use conway_term::input::CrosstermKeys;
use conway_term::render::Viewport;
use conway_term::session::TerminalSession;
use conway_term::surface::{Surface, TerminalSurface};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The terminal session is already restored here.
            println!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    init_tracing(cli)?;
    if cli.curses { run_interactive(cli) } else { run_headless(cli) }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.curses {
        // Anything written to the terminal would land on top of the grid.
        let Some(path) = &cli.log_file else { return Ok(()) };
        let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }
    Ok(())
}

fn run_interactive(cli: &Cli) -> Result<()> {
    let frames = {
        let _session = TerminalSession::start().context("failed to prepare the terminal")?;
        let surface = TerminalSurface::new(io::stdout()).context("failed to open the terminal")?;
        let (rows, cols) = surface.size();
        let viewport = Viewport::for_screen(rows, cols)?;
        let bounds = (usize::from(viewport.height), usize::from(viewport.width));
        let grid = cli.initial_grid(Some(bounds)).context("failed to build the starting grid")?;

        let mut controller = Controller::new(surface, CrosstermKeys, grid, cli.options())?;
        controller.run()?
    };
    if frames > 0 {
        println!("Wrote {frames} frames to {}", cli.record_path().display());
    }
    Ok(())
}

fn run_headless(cli: &Cli) -> Result<()> {
    let grid = cli.initial_grid(None).context("failed to build the starting grid")?;
    info!(height = grid.height(), width = grid.width(), generations = cli.generations, "headless run");
    let options = HeadlessOptions {
        policy: cli.policy(),
        generations: cli.generations,
        tick_interval_ms: cli.interval_ms,
        record: cli.record.clone(),
    };
    headless::run(grid, &options, &mut io::stdout().lock())?;
    Ok(())
}
