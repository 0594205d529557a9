//! Reducer function for state transitions
//!
//! `(State, Action) -> State`
//!
//! The reducer performs no I/O and never reads a clock: every time value it
//! needs arrives inside the action. The only outward effect is queueing
//! audible cues on the state's channel, which never blocks.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::debug;

use libdeskclock::format::format_elapsed;
use libdeskclock::{Notice, ZoneRef};

use super::actions::{Action, Tab};
use super::state::{cue_sink, AppState, StatusBarState};

/// Reducer function
///
/// Takes current state and an action, returns new state.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key, at) => handle_key(state, key, at),
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Scheduled work ===
        Action::Refresh { local, utc } => {
            let mut state = state;
            let refresh = state.session.refresh(&local, utc, cue_sink(&state.cues));
            let notice = join_notices(&refresh.notices);
            state.view.latest = Some(refresh);
            match notice {
                Some(text) => reduce(state, Action::ShowNotice(text)),
                None => state,
            }
        }

        Action::TimerSecond => {
            let mut state = state;
            match state.session.timer_second(cue_sink(&state.cues)) {
                Some(notice) => reduce(state, Action::ShowNotice(notice_text(&notice))),
                None => state,
            }
        }

        Action::StopwatchDisplay(at) => AppState {
            stopwatch_display: state.session.stopwatch.display(at),
            ..state
        },

        // === Navigation ===
        // A status line belongs to the tab it was raised on
        Action::NavigateTo(tab) if tab != state.current_tab => reduce(
            AppState {
                current_tab: tab,
                ..state
            },
            Action::ClearStatus,
        ),
        Action::NavigateTo(_) => state,

        Action::NextTab => {
            let tab = state.current_tab.next();
            reduce(state, Action::NavigateTo(tab))
        }

        Action::PrevTab => {
            let tab = state.current_tab.prev();
            reduce(state, Action::NavigateTo(tab))
        }

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        // === Preferences ===
        Action::CycleLanguage => {
            let mut state = state;
            let language = state.session.language().next();
            state.session.set_language(language);
            reduce(state, Action::SetStatus(format!("Language: {}", language)))
        }

        Action::ToggleHourFormat => {
            let mut state = state;
            let format = state.session.hour_format().toggled();
            state.session.set_hour_format(format);
            state
        }

        // === Text entry ===
        Action::EntryChanged(content) => {
            let mut state = state;
            let tab = state.current_tab;
            state.entry.set_for_tab(tab, content);
            state
        }

        // === Alarm ===
        Action::AlarmArm => arm_alarm(state),

        Action::AlarmDisarm => {
            let mut state = state;
            state.session.alarm.disarm();
            reduce(state, Action::SetStatus("Alarm off".to_string()))
        }

        // === Timer ===
        Action::TimerStart => {
            let mut state = state;
            let entry = state.entry.timer.clone();
            match state.session.timer.start_from_str(&entry) {
                Ok(()) => {
                    let status = format!("Timer started: {}", state.session.timer.display());
                    reduce(state, Action::SetStatus(status))
                }
                Err(e) => reduce(state, Action::ShowError(e.to_string())),
            }
        }

        Action::TimerTogglePause => {
            let mut state = state;
            state.session.timer.toggle_pause();
            state
        }

        Action::TimerReset => {
            let mut state = state;
            state.session.timer.reset();
            state
        }

        // === Stopwatch ===
        Action::StopwatchToggle(at) => {
            let mut state = state;
            state.session.stopwatch.toggle(at);
            state.stopwatch_display = state.session.stopwatch.display(at);
            state
        }

        Action::StopwatchLap(at) => {
            let mut state = state;
            let lap = state.session.stopwatch.lap(at);
            state.stopwatch_display = state.session.stopwatch.display(at);
            reduce(state, Action::SetStatus(lap.describe()))
        }

        Action::StopwatchReset => {
            let mut state = state;
            state.session.stopwatch.reset();
            state.stopwatch_display = format_elapsed(0.0);
            state
        }

        // === Zones ===
        Action::ZoneAdd => add_zone(state),

        Action::ZoneRemoveSelected => {
            let mut state = state;
            if state.session.zones.remove_zone(ZoneRef::Index(state.zone_selected)) {
                let last = state.session.zones.len().saturating_sub(1);
                state.zone_selected = state.zone_selected.min(last);
            }
            state
        }

        Action::ZoneSelectNext => {
            let last = state.session.zones.len().saturating_sub(1);
            AppState {
                zone_selected: (state.zone_selected + 1).min(last),
                ..state
            }
        }

        Action::ZoneSelectPrev => AppState {
            zone_selected: state.zone_selected.saturating_sub(1),
            ..state
        },

        // === Overlays ===
        Action::ShowNotice(text) => AppState {
            notice: Some(text),
            ..state
        },

        Action::DismissNotice => AppState {
            notice: None,
            ..state
        },

        Action::ShowError(error) => AppState {
            error: Some(error),
            ..state
        },

        Action::DismissError => AppState {
            error: None,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

/// `HH:MM` optionally followed by a message
fn arm_alarm(mut state: AppState) -> AppState {
    let entry = state.entry.alarm.trim().to_string();
    let (time, message) = match entry.split_once(char::is_whitespace) {
        Some((time, message)) => (time, message.trim()),
        None => (entry.as_str(), ""),
    };
    let message = if message.is_empty() {
        state.default_alarm_message.clone()
    } else {
        message.to_string()
    };

    match state.session.alarm.arm_from_str(time, message) {
        Ok(()) => {
            state.entry.alarm.clear();
            let status = state.session.alarm.status_text();
            reduce(state, Action::SetStatus(status))
        }
        Err(e) => reduce(state, Action::ShowError(e.to_string())),
    }
}

fn add_zone(mut state: AppState) -> AppState {
    let entry = state.entry.zone.trim().to_string();
    if entry.is_empty() {
        return state;
    }
    match state.session.zones.add_zone(&entry) {
        Ok(added) => {
            state.entry.zone.clear();
            let status = if added {
                format!("Added {}", entry)
            } else {
                format!("{} is already listed", entry)
            };
            reduce(state, Action::SetStatus(status))
        }
        Err(e) => reduce(state, Action::ShowError(e.to_string())),
    }
}

fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::Alarm(message) if message.is_empty() => "Alarm!".to_string(),
        Notice::Alarm(message) => format!("Alarm: {}", message),
        Notice::TimerFinished => "Time's up!".to_string(),
    }
}

fn join_notices(notices: &[Notice]) -> Option<String> {
    if notices.is_empty() {
        return None;
    }
    Some(notices.iter().map(notice_text).collect::<Vec<_>>().join("\n"))
}

/// Handle keyboard input
///
/// Maps keys to high-level actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent, at: Instant) -> AppState {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        // Dismiss overlays, topmost first
        (KeyCode::Esc, _) | (KeyCode::Enter, _) if state.error.is_some() => {
            return reduce(state, Action::DismissError);
        }
        (KeyCode::Esc, _) | (KeyCode::Enter, _) if state.notice.is_some() => {
            return reduce(state, Action::DismissNotice);
        }
        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible { Action::HideHelp } else { Action::ShowHelp };
            return reduce(state, action);
        }

        _ => {}
    }

    if state.overlay_visible() {
        debug!(?key, "key ignored behind overlay");
        return state;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => return reduce(state, Action::NextTab),
        (KeyCode::BackTab, _) => return reduce(state, Action::PrevTab),
        (KeyCode::F(2), _) => return reduce(state, Action::CycleLanguage),
        (KeyCode::F(3), _) => return reduce(state, Action::ToggleHourFormat),
        (KeyCode::Char('q'), KeyModifiers::NONE) if !state.current_tab.has_entry() => {
            return reduce(state, Action::Quit);
        }
        _ => {}
    }

    // Tab-specific keybindings
    match state.current_tab {
        Tab::Clock => state,
        Tab::Alarm => handle_alarm_key(state, key),
        Tab::Timer => handle_timer_key(state, key),
        Tab::Stopwatch => handle_stopwatch_key(state, key, at),
        Tab::Zones => handle_zones_key(state, key),
    }
}

fn handle_alarm_key(state: AppState, key: KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => reduce(state, Action::AlarmArm),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => reduce(state, Action::AlarmDisarm),
        _ => state,
    }
}

fn handle_timer_key(state: AppState, key: KeyEvent) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => reduce(state, Action::TimerStart),
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => reduce(state, Action::TimerTogglePause),
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => reduce(state, Action::TimerReset),
        _ => state,
    }
}

fn handle_stopwatch_key(state: AppState, key: KeyEvent, at: Instant) -> AppState {
    match (key.code, key.modifiers) {
        (KeyCode::Char(' '), _) => reduce(state, Action::StopwatchToggle(at)),
        (KeyCode::Char('l'), KeyModifiers::NONE) => reduce(state, Action::StopwatchLap(at)),
        (KeyCode::Char('r'), KeyModifiers::NONE) => reduce(state, Action::StopwatchReset),
        _ => state,
    }
}

fn handle_zones_key(state: AppState, key: KeyEvent) -> AppState {
    match key.code {
        KeyCode::Enter => reduce(state, Action::ZoneAdd),
        KeyCode::Up => reduce(state, Action::ZoneSelectPrev),
        KeyCode::Down => reduce(state, Action::ZoneSelectNext),
        KeyCode::Delete => reduce(state, Action::ZoneRemoveSelected),
        _ => state,
    }
}
