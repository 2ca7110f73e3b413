// input.rs - Keyboard input, gathered in fixed wall-clock windows

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TerminalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    /// Ctrl-C; raw mode delivers it as a key instead of a signal.
    Interrupt,
}

/// Where keys come from.
pub trait KeySource {
    /// Waits up to `wait` for the next key. `Ok(None)` means nothing arrived.
    fn next_key(&mut self, wait: Duration) -> Result<Option<Key>, TerminalError>;
    /// Drops anything already buffered.
    fn discard_pending(&mut self) -> Result<(), TerminalError>;
}

/// Collects every key that arrives within `window`, in arrival order and
/// with repeats kept, then flushes what the source still has buffered so
/// the next window starts clean.
pub fn poll<K: KeySource + ?Sized>(source: &mut K, window: Duration) -> Result<Vec<Key>, TerminalError> {
    let started = Instant::now();
    let mut keys = Vec::new();
    loop {
        let elapsed = started.elapsed();
        if elapsed >= window {
            break;
        }
        if let Some(key) = source.next_key(window - elapsed)? {
            keys.push(key);
        }
    }
    source.discard_pending()?;
    Ok(keys)
}

/// Keys from the real terminal.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, wait: Duration) -> Result<Option<Key>, TerminalError> {
        if !event::poll(wait)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(translate(key)),
            _ => Ok(None),
        }
    }

    fn discard_pending(&mut self) -> Result<(), TerminalError> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }
}

fn translate(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Interrupt),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

/// A fixed sequence of keys, replayed one batch per read cycle. Used to
/// drive the controller without a terminal.
///
/// A batch becomes current on the first read after a discard; reads then
/// drain it and return `None` until the next discard moves on.
#[derive(Debug)]
pub struct ScriptedKeys {
    batches: VecDeque<Vec<Key>>,
    current: VecDeque<Key>,
    fresh: bool,
}

impl ScriptedKeys {
    pub fn new(batches: impl IntoIterator<Item = Vec<Key>>) -> Self {
        Self { batches: batches.into_iter().collect(), current: VecDeque::new(), fresh: true }
    }

    /// Keys typed as text, one per character.
    pub fn typed(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty() && self.current.is_empty()
    }
}

impl Default for ScriptedKeys {
    fn default() -> Self {
        Self::new([])
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, _wait: Duration) -> Result<Option<Key>, TerminalError> {
        if self.fresh {
            self.fresh = false;
            self.current = self.batches.pop_front().unwrap_or_default().into();
        }
        Ok(self.current.pop_front())
    }

    fn discard_pending(&mut self) -> Result<(), TerminalError> {
        self.current.clear();
        self.fresh = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_keeps_order_and_repeats() {
        let mut keys = ScriptedKeys::new([ScriptedKeys::typed("wwdz")]);
        let batch = poll(&mut keys, Duration::from_millis(5)).unwrap();
        assert_eq!(batch, ScriptedKeys::typed("wwdz"));
    }

    #[test]
    fn poll_takes_one_window_at_a_time() {
        let mut keys = ScriptedKeys::new([vec![Key::Char('r')], vec![Key::Char('q')]]);
        assert_eq!(poll(&mut keys, Duration::from_millis(2)).unwrap(), vec![Key::Char('r')]);
        assert_eq!(poll(&mut keys, Duration::from_millis(2)).unwrap(), vec![Key::Char('q')]);
        assert!(poll(&mut keys, Duration::from_millis(2)).unwrap().is_empty());
        assert!(keys.is_exhausted());
    }

    #[test]
    fn poll_waits_out_the_window() {
        let mut keys = ScriptedKeys::default();
        let started = Instant::now();
        poll(&mut keys, Duration::from_millis(20)).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn translates_presses_only() {
        let press = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE);
        assert_eq!(translate(press), Some(Key::Char('e')));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(ctrl_c), Some(Key::Interrupt));
        let mut release = press;
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(release), None);
        assert_eq!(translate(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)), None);
    }
}
