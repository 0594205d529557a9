//! Event handling infrastructure
//!
//! Polls the terminal for input with a timeout chosen by the scheduler, and
//! decides which keys belong to the text entry rather than the reducer.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, AppState};

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Poll timed out
    Tick,
}

impl TuiEvent {
    /// Convert to an action, stamping keys with the moment they were read
    pub fn into_action(self, at: Instant) -> Action {
        match self {
            TuiEvent::Key(key) => Action::Key(key, at),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    max_wait: Duration,
}

impl EventHandler {
    /// Create a new event handler that never waits longer than `max_wait_ms`
    pub fn new(max_wait_ms: u64) -> Self {
        Self {
            max_wait: Duration::from_millis(max_wait_ms),
        }
    }

    /// Poll for the next event, blocking up to `timeout` (capped at the
    /// handler's maximum wait)
    ///
    /// Returns `TuiEvent::Tick` if nothing arrived in time.
    pub fn next(&self, timeout: Duration) -> std::io::Result<TuiEvent> {
        if event::poll(timeout.min(self.max_wait))? {
            match event::read()? {
                // Ignore key releases on terminals that report them
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Ok(TuiEvent::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}

/// Should this key be typed into the current tab's entry line?
///
/// Keys with a binding on the current tab, the global hotkeys and anything
/// pressed behind an overlay go to the reducer instead.
pub fn routes_to_entry(state: &AppState, key: &KeyEvent) -> bool {
    if !state.current_tab.has_entry() || state.overlay_visible() {
        return false;
    }

    let is_command = matches!(
        (key.code, key.modifiers),
        (KeyCode::Tab, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::F(_), _)
            | (KeyCode::Esc, _)
            | (KeyCode::Enter, _)
            | (KeyCode::Up, _)
            | (KeyCode::Down, _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL)
            | (KeyCode::Char('p'), KeyModifiers::CONTROL)
            | (KeyCode::Char('r'), KeyModifiers::CONTROL)
    );
    let removes_zone = state.current_tab == crate::app::Tab::Zones && key.code == KeyCode::Delete;

    !is_command && !removes_zone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Tab;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(200);
        assert_eq!(handler.max_wait, Duration::from_millis(200));
    }

    #[test]
    fn test_tick_converts_to_tick_action() {
        assert!(matches!(TuiEvent::Tick.into_action(Instant::now()), Action::Tick));
    }

    #[test]
    fn test_typing_goes_to_entry_on_entry_tabs() {
        let mut state = AppState::new();
        assert!(!routes_to_entry(&state, &key(KeyCode::Char('7'))));

        state.current_tab = Tab::Alarm;
        assert!(routes_to_entry(&state, &key(KeyCode::Char('7'))));
        assert!(routes_to_entry(&state, &key(KeyCode::Char('q'))));
        assert!(routes_to_entry(&state, &key(KeyCode::Delete)));
        assert!(!routes_to_entry(&state, &key(KeyCode::Enter)));
        assert!(!routes_to_entry(&state, &key(KeyCode::Tab)));
    }

    #[test]
    fn test_delete_removes_zone_instead_of_editing() {
        let mut state = AppState::new();
        state.current_tab = Tab::Zones;
        assert!(!routes_to_entry(&state, &key(KeyCode::Delete)));
        assert!(routes_to_entry(&state, &key(KeyCode::Backspace)));
    }

    #[test]
    fn test_overlay_blocks_entry() {
        let mut state = AppState::new();
        state.current_tab = Tab::Timer;
        state.error = Some("bad".to_string());
        assert!(!routes_to_entry(&state, &key(KeyCode::Char('1'))));
    }
}
