//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use std::time::Instant;

use chrono::{DateTime, NaiveDateTime, Utc};
use crossterm::event::KeyEvent;

/// Actions that trigger state transitions
///
/// Actions are plain data describing what happened. Anything time-dependent
/// carries the moment it happened: wall-clock time for the refresh tick,
/// a monotonic `Instant` for keys and stopwatch updates.
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event and when it was read
    Key(KeyEvent, Instant),

    /// Poll timeout with nothing due
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Scheduled work ===
    /// Refresh clock, date, hands and zone table; evaluate alarm and chime
    Refresh {
        local: NaiveDateTime,
        utc: DateTime<Utc>,
    },

    /// Take one second off the countdown
    TimerSecond,

    /// Redraw the running stopwatch
    StopwatchDisplay(Instant),

    // === Navigation ===
    NavigateTo(Tab),
    NextTab,
    PrevTab,
    Quit,
    ShowHelp,
    HideHelp,

    // === Preferences ===
    CycleLanguage,
    ToggleHourFormat,

    // === Text entry ===
    /// Entry line of the current tab changed
    EntryChanged(String),

    // === Alarm ===
    /// Arm from the alarm entry (`HH:MM [message]`)
    AlarmArm,
    AlarmDisarm,

    // === Timer ===
    /// Start from the timer entry
    TimerStart,
    TimerTogglePause,
    TimerReset,

    // === Stopwatch ===
    StopwatchToggle(Instant),
    StopwatchLap(Instant),
    StopwatchReset,

    // === Zones ===
    /// Add the zone typed in the zones entry
    ZoneAdd,
    ZoneRemoveSelected,
    ZoneSelectNext,
    ZoneSelectPrev,

    // === Overlays ===
    /// Show a one-off message (alarm fired, timer finished)
    ShowNotice(String),
    DismissNotice,
    ShowError(String),
    DismissError,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,
}

/// Tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Clock,
    Alarm,
    Timer,
    Stopwatch,
    Zones,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Clock, Tab::Alarm, Tab::Timer, Tab::Stopwatch, Tab::Zones];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Clock => "Clock",
            Tab::Alarm => "Alarm",
            Tab::Timer => "Timer",
            Tab::Stopwatch => "Stopwatch",
            Tab::Zones => "Zones",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs with a text entry line
    pub fn has_entry(&self) -> bool {
        matches!(self, Tab::Alarm | Tab::Timer | Tab::Zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Zones.next(), Tab::Clock);
        assert_eq!(Tab::Clock.prev(), Tab::Zones);
        let mut tab = Tab::Clock;
        for _ in 0..Tab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Clock);
    }

    #[test]
    fn test_entry_tabs() {
        assert!(!Tab::Clock.has_entry());
        assert!(Tab::Alarm.has_entry());
        assert!(!Tab::Stopwatch.has_entry());
    }
}
