// controller.rs - The interactive loop: poll keys, apply them, step, draw
//
// The controller owns the only live Grid. A tick applies every key in the
// polled batch in arrival order, then steps one generation (main menu,
// running), then draws once.

use std::path::PathBuf;
use std::time::Duration;

use conway::patterns::{self, PATTERNS};
use conway::{BoundaryPolicy, Cursor, FrameRecorder, Grid, snapshot};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::input::{self, Key, KeySource};
use crate::prompt::{self, Answer};
use crate::render::{self, Status, Viewport};
use crate::state::{Effect, Mode, SimulationState};
use crate::surface::Surface;

/// Poll window while editing; the main menu polls for the tick interval.
pub const EDIT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub policy: BoundaryPolicy,
    pub tick_interval_ms: u64,
    pub record_path: PathBuf,
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            policy: BoundaryPolicy::Bounded,
            tick_interval_ms: crate::state::DEFAULT_TICK_MS,
            record_path: PathBuf::from("output.gif"),
            seed: None,
        }
    }
}

pub struct Controller<S, K> {
    surface: S,
    keys: K,
    viewport: Viewport,
    grid: Grid,
    state: SimulationState,
    cursor: Option<Cursor>,
    recorder: FrameRecorder,
    policy: BoundaryPolicy,
    record_path: PathBuf,
    rng: SmallRng,
    pattern: usize,
    generation: u64,
    message: Option<String>,
}

impl<S: Surface, K: KeySource> Controller<S, K> {
    pub fn new(surface: S, keys: K, grid: Grid, options: Options) -> Result<Self, AppError> {
        let (rows, cols) = surface.size();
        let viewport = Viewport::for_screen(rows, cols)?;
        let rng = match options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            surface,
            keys,
            viewport,
            grid,
            state: SimulationState::new(options.tick_interval_ms),
            cursor: None,
            recorder: FrameRecorder::new(),
            policy: options.policy,
            record_path: options.record_path,
            rng,
            pattern: 0,
            generation: 0,
            message: None,
        })
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn state(&self) -> SimulationState { self.state }
    pub fn cursor(&self) -> Option<Cursor> { self.cursor }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn frames_recorded(&self) -> usize { self.recorder.len() }
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn viewport(&self) -> Viewport { self.viewport }

    /// Ticks until quit, then writes out any recording. Returns the number
    /// of frames written.
    pub fn run(&mut self) -> Result<usize, AppError> {
        info!(
            height = self.grid.height(),
            width = self.grid.width(),
            policy = ?self.policy,
            tick_interval_ms = self.state.tick_interval_ms,
            "simulation loop started"
        );
        self.draw()?;
        while self.tick()? == Flow::Continue {}
        self.finish()
    }

    pub fn tick(&mut self) -> Result<Flow, AppError> {
        let window = match self.state.mode {
            Mode::MainMenu => Duration::from_millis(self.state.tick_interval_ms),
            Mode::Edit => EDIT_POLL,
        };
        let keys = input::poll(&mut self.keys, window)?;
        if self.dispatch(&keys)? == Flow::Quit {
            return Ok(Flow::Quit);
        }
        if self.state.mode == Mode::MainMenu && self.state.running {
            self.advance();
        }
        self.draw()?;
        Ok(Flow::Continue)
    }

    /// Applies a batch of keys in order. Keys after a mode switch are read in
    /// the new mode; nothing after a quit is applied.
    pub fn dispatch(&mut self, keys: &[Key]) -> Result<Flow, AppError> {
        for &key in keys {
            let before = self.state;
            let (state, effect) = before.apply(key);
            self.state = state;
            if state.running != before.running || state.tick_interval_ms != before.tick_interval_ms {
                debug!(running = state.running, tick_interval_ms = state.tick_interval_ms, "simulation state changed");
            }
            if self.perform(effect)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Writes out the recording, if anything was captured.
    pub fn finish(&mut self) -> Result<usize, AppError> {
        let written = self.recorder.flush(&self.record_path)?;
        info!(generation = self.generation, frames = written, "simulation loop finished");
        Ok(written)
    }

    /// One generation under the configured boundary policy.
    pub fn advance(&mut self) {
        self.grid = conway::step(&self.grid, self.policy);
        self.generation += 1;
        if self.state.recording {
            self.recorder.capture(&self.grid, self.state.tick_interval_ms);
        }
    }

    fn perform(&mut self, effect: Effect) -> Result<Flow, AppError> {
        match effect {
            Effect::None => {}
            Effect::Quit => {
                info!("quit requested");
                return Ok(Flow::Quit);
            }
            Effect::EnterEdit => {
                let grid = &self.grid;
                self.cursor.get_or_insert_with(|| Cursor::centered(grid));
                self.message = None;
                debug!(cursor = ?self.cursor, "entered edit mode");
            }
            Effect::LeaveEdit => {
                self.message = None;
                debug!("left edit mode");
            }
            Effect::RecordingChanged => {
                let message = if self.state.recording {
                    "Recording started.".to_string()
                } else {
                    format!("Recording paused, {} frames held.", self.recorder.len())
                };
                info!(recording = self.state.recording, frames = self.recorder.len(), "recording toggled");
                self.message = Some(message);
            }
            Effect::Move(direction) => {
                self.cursor = Some(self.edit_cursor().moved(direction, &self.grid));
            }
            Effect::SetCell(alive) => {
                let cursor = self.edit_cursor();
                self.grid.set(cursor.row, cursor.col, alive)?;
            }
            Effect::Fill(alive) => {
                self.grid.fill(alive);
                self.generation = 0;
            }
            Effect::Randomize => {
                self.grid = conway::randomize(self.grid.height(), self.grid.width(), &mut self.rng)?;
                self.generation = 0;
            }
            Effect::Save => return self.save(),
            Effect::Load => return self.load(),
            Effect::StampPattern => {
                let cursor = self.edit_cursor();
                let pattern = &PATTERNS[self.pattern % PATTERNS.len()];
                let placed = patterns::stamp(&mut self.grid, pattern, cursor.row, cursor.col);
                debug!(pattern = pattern.name, placed, "stamped pattern");
            }
            Effect::NextPattern => {
                self.pattern = (self.pattern + 1) % PATTERNS.len();
            }
        }
        Ok(Flow::Continue)
    }

    fn edit_cursor(&mut self) -> Cursor {
        let cursor = self.cursor.unwrap_or_else(|| Cursor::centered(&self.grid)).clamped(&self.grid);
        self.cursor = Some(cursor);
        cursor
    }

    fn save(&mut self) -> Result<Flow, AppError> {
        let name = match prompt::read_line(&mut self.surface, &mut self.keys, "Save as: ")? {
            Answer::Line(name) => name,
            answer => return Ok(self.unanswered(answer)),
        };
        self.message = Some(match snapshot::save(&self.grid, &name) {
            Ok(()) => format!("Saved pattern as: {name}"),
            Err(err) => {
                warn!(%err, "save failed");
                format!("Error: {err}")
            }
        });
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> Result<Flow, AppError> {
        let name = match prompt::read_line(&mut self.surface, &mut self.keys, "Load file: ")? {
            Answer::Line(name) => name,
            answer => return Ok(self.unanswered(answer)),
        };
        self.message = Some(match snapshot::load(&name) {
            Ok(grid) => {
                info!(path = %name, height = grid.height(), width = grid.width(), "loaded pattern");
                self.grid = grid;
                self.cursor = self.cursor.map(|cursor| cursor.clamped(&self.grid));
                self.generation = 0;
                "File loaded.".to_string()
            }
            Err(err) => {
                warn!(%err, "load failed");
                format!("Error: {err}")
            }
        });
        Ok(Flow::Continue)
    }

    /// A prompt that ended without a name: Ctrl-C quits like the main menu's
    /// `q`, anything else only cancels.
    fn unanswered(&mut self, answer: Answer) -> Flow {
        if answer == Answer::Interrupted {
            info!("interrupted at prompt");
            return Flow::Quit;
        }
        self.message = Some("Cancelled.".to_string());
        Flow::Continue
    }

    fn draw(&mut self) -> Result<(), AppError> {
        self.surface.clear();
        match self.state.mode {
            Mode::MainMenu => {
                let status = Status {
                    generation: self.generation,
                    live: self.grid.live_count(),
                    tick_interval_ms: self.state.tick_interval_ms,
                    running: self.state.running,
                    recording: self.state.recording,
                    message: self.message.as_deref(),
                };
                render::draw_main_banner(&mut self.surface, &status);
                render::draw_grid(&mut self.surface, self.viewport, &self.grid, None);
            }
            Mode::Edit => {
                let pattern = PATTERNS[self.pattern % PATTERNS.len()].name;
                render::draw_edit_banner(&mut self.surface, pattern, self.message.as_deref());
                render::draw_grid(&mut self.surface, self.viewport, &self.grid, self.cursor);
            }
        }
        self.surface.refresh()?;
        Ok(())
    }
}
