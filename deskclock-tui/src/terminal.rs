//! Terminal management
//!
//! The clock owns the whole screen while it runs: raw mode, the alternate
//! screen and a hidden cursor. Every exit path, panics included, puts all
//! three back.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal; the entry line draws its own cursor
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

/// Hand the terminal back in the state we found it
pub fn restore_terminal(mut terminal: Tui) -> Result<()> {
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// Ring the terminal bell `beeps` times
///
/// Best effort: a terminal that cannot ring is not an error.
pub fn ring_bell(terminal: &mut Tui, beeps: usize) {
    let backend = terminal.backend_mut();
    for _ in 0..beeps {
        let _ = backend.write_all(b"\x07");
    }
    let _ = backend.flush();
}

/// Restore the screen before the default hook prints the panic message
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
        previous(info);
    }));
}
