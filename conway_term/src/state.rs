// state.rs - Simulation state and the key transition table

use conway::Direction;

use crate::input::Key;

pub const MIN_TICK_MS: u64 = 30;
pub const MAX_TICK_MS: u64 = 5000;
pub const DEFAULT_TICK_MS: u64 = 100;
pub const TICK_STEP_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    MainMenu,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationState {
    pub mode: Mode,
    pub running: bool,
    pub tick_interval_ms: u64,
    pub recording: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

/// What the controller has to do to the grid, cursor or disk after a
/// transition. State-only changes (run, pause, speed) carry no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    EnterEdit,
    LeaveEdit,
    RecordingChanged,
    Move(Direction),
    SetCell(bool),
    Fill(bool),
    Randomize,
    Save,
    Load,
    StampPattern,
    NextPattern,
}

impl SimulationState {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            mode: Mode::MainMenu,
            running: false,
            tick_interval_ms: tick_interval_ms.clamp(MIN_TICK_MS, MAX_TICK_MS),
            recording: false,
        }
    }

    /// The next state after `key`, plus the side effect it asks for.
    /// Keys with no meaning in the current mode leave the state unchanged.
    pub fn apply(self, key: Key) -> (Self, Effect) {
        if key == Key::Interrupt {
            return (self, Effect::Quit);
        }
        let Key::Char(c) = key else {
            return (self, Effect::None);
        };
        match self.mode {
            Mode::MainMenu => self.apply_main(c),
            Mode::Edit => self.apply_edit(c),
        }
    }

    fn apply_main(self, c: char) -> (Self, Effect) {
        match c {
            'q' => (self, Effect::Quit),
            'e' => (Self { mode: Mode::Edit, ..self }, Effect::EnterEdit),
            'r' => (Self { running: true, ..self }, Effect::None),
            'p' => (Self { running: false, ..self }, Effect::None),
            'g' => (self.with_interval(self.tick_interval_ms.saturating_sub(TICK_STEP_MS)), Effect::None),
            'h' => (self.with_interval(self.tick_interval_ms.saturating_add(TICK_STEP_MS)), Effect::None),
            'v' => (Self { recording: !self.recording, ..self }, Effect::RecordingChanged),
            _ => (self, Effect::None),
        }
    }

    fn apply_edit(self, c: char) -> (Self, Effect) {
        let effect = match c {
            'q' => return (Self { mode: Mode::MainMenu, ..self }, Effect::LeaveEdit),
            'w' => Effect::Move(Direction::Up),
            's' => Effect::Move(Direction::Down),
            'a' => Effect::Move(Direction::Left),
            'd' => Effect::Move(Direction::Right),
            'z' => Effect::SetCell(true),
            'x' => Effect::SetCell(false),
            'f' => Effect::Fill(true),
            'c' => Effect::Fill(false),
            'n' => Effect::Randomize,
            'o' => Effect::Save,
            'l' => Effect::Load,
            't' => Effect::StampPattern,
            'y' => Effect::NextPattern,
            _ => Effect::None,
        };
        (self, effect)
    }

    fn with_interval(self, tick_interval_ms: u64) -> Self {
        Self { tick_interval_ms: tick_interval_ms.clamp(MIN_TICK_MS, MAX_TICK_MS), ..self }
    }
}
