// prompt.rs - Blocking single-line prompt for snapshot file names

use std::time::Duration;

use crate::error::TerminalError;
use crate::input::{Key, KeySource};
use crate::surface::Surface;

const PROMPT_ROW: u16 = 1;
const KEY_WAIT: Duration = Duration::from_millis(250);

/// How a prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Line(String),
    /// Esc, or an empty line confirmed.
    Cancelled,
    /// Ctrl-C; the caller quits.
    Interrupted,
}

/// Asks for a line of text under `label`, echoing it as it is typed.
/// Nothing else runs while the prompt is open.
pub fn read_line<S, K>(surface: &mut S, keys: &mut K, label: &str) -> Result<Answer, TerminalError>
where
    S: Surface + ?Sized,
    K: KeySource + ?Sized,
{
    let mut line = String::new();
    let answer = loop {
        surface.clear();
        surface.write_text(PROMPT_ROW, 0, &format!("{label}{line}_"));
        surface.refresh()?;

        match keys.next_key(KEY_WAIT)? {
            Some(Key::Enter) => {
                let name = line.trim();
                break if name.is_empty() { Answer::Cancelled } else { Answer::Line(name.to_string()) };
            }
            Some(Key::Esc) => break Answer::Cancelled,
            Some(Key::Interrupt) => break Answer::Interrupted,
            Some(Key::Backspace) => { line.pop(); }
            Some(Key::Char(c)) if !c.is_control() => line.push(c),
            _ => {}
        }
    };
    keys.discard_pending()?;
    surface.clear();
    Ok(answer)
}
