// session.rs - Raw-mode terminal session
//
// Raw mode, the alternate screen and a hidden cursor are undone on drop and
// from a panic hook, so a crash never leaves the shell without echo.

use std::io::{self, Write};
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use tracing::{debug, error};

use crate::error::TerminalError;

static PANIC_HOOK: Once = Once::new();

#[must_use = "the terminal is restored when the session is dropped"]
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn start() -> Result<Self, TerminalError> {
        install_panic_hook();
        enable_raw_mode()?;
        // From here on Drop undoes whatever part succeeded.
        let session = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        debug!("terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        debug!("terminal session restored");
    }
}

fn restore() {
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, Show, LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    let _ = stdout.flush();
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));
    });
}
