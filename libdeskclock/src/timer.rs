//! Countdown timer state machine
//!
//! The timer is decremented by one second per `tick()`; the shell is
//! responsible for calling it once per elapsed second.

use tracing::{debug, info};

use crate::cue::{CueSink, CueStrength};
use crate::format::{format_duration, parse_hms};
use crate::{ClockError, Result};

/// Five minutes, the entry shown before the user types anything
pub const DEFAULT_TIMER_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Outcome of one timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Timer is not running; nothing happened
    Idle,
    /// One second was taken off
    Ticked { remaining: u64 },
    /// Reached zero on this tick
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    total: u64,
    remaining: u64,
    state: TimerState,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::with_duration(DEFAULT_TIMER_SECONDS)
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle timer preset to `seconds` (at least one)
    pub fn with_duration(seconds: u64) -> Self {
        let total = seconds.max(1);
        Self {
            total,
            remaining: total,
            state: TimerState::Idle,
        }
    }

    /// Start counting down from `hours:minutes:seconds`
    ///
    /// # Errors
    ///
    /// Returns `ClockError::Validation` if minutes or seconds are 60 or more,
    /// or the total is zero. The timer is left untouched in that case.
    pub fn start(&mut self, hours: u64, minutes: u64, seconds: u64) -> Result<()> {
        if minutes > 59 || seconds > 59 {
            return Err(ClockError::Validation(
                "minutes and seconds must be between 00 and 59".to_string(),
            ));
        }
        let total = hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(|| ClockError::Validation("duration is too long".to_string()))?;
        if total == 0 {
            return Err(ClockError::Validation(
                "duration must be greater than zero".to_string(),
            ));
        }

        self.total = total;
        self.remaining = total;
        self.state = TimerState::Running;
        info!(total, "timer started");
        Ok(())
    }

    /// Start from user text: `H:MM:SS`, or a friendly duration like `5m` or `1h 30m`
    pub fn start_from_str(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.contains(':') {
            let (h, m, s) = parse_hms(text)?;
            return self.start(h, m, s);
        }

        let duration = humantime::parse_duration(text)
            .map_err(|e| ClockError::Validation(format!("'{}': {}", text, e)))?;
        let secs = duration.as_secs();
        self.start(secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    /// Running ↔ Paused; ignored when idle or expired
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused => TimerState::Running,
            other => other,
        };
        debug!(state = ?self.state, "timer pause toggled");
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = self.total;
    }

    /// Take one second off a running timer
    pub fn tick(&mut self, cues: &dyn CueSink) -> TimerEvent {
        if self.state != TimerState::Running {
            return TimerEvent::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            cues.signal(CueStrength::Triple);
            info!(total = self.total, "timer expired");
            return TimerEvent::Expired;
        }

        TimerEvent::Ticked {
            remaining: self.remaining,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Fraction of the countdown already elapsed, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining as f64 / self.total.max(1) as f64
    }

    pub fn display(&self) -> String {
        format_duration(self.remaining)
    }

    pub fn status_text(&self) -> &'static str {
        match self.state {
            TimerState::Idle => "Ready",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
            TimerState::Expired => "Time's up!",
        }
    }
}
