//! Clock session
//!
//! `ClockSession` is the one owned bundle of clock state that a shell keeps
//! for its lifetime and threads through every tick. It coordinates the
//! individual state machines:
//!
//! - [`Alarm`]: evaluated on every refresh
//! - [`CountdownTimer`]: decremented once per second by the shell
//! - [`Stopwatch`]: read on demand against a monotonic clock
//! - [`TimezoneSet`]: converted on every refresh
//! - [`HourlyChime`]: evaluated on every refresh
//!
//! # Example
//!
//! ```
//! use chrono::{Local, Utc};
//! use libdeskclock::cue::NullCueSink;
//! use libdeskclock::session::ClockSession;
//! use libdeskclock::Config;
//!
//! let mut session = ClockSession::from_config(&Config::default());
//! let refresh = session.refresh(&Local::now(), Utc::now(), &NullCueSink);
//! assert_eq!(refresh.zones.len(), 7);
//! ```

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::alarm::{Alarm, AlarmEvent};
use crate::chime::HourlyChime;
use crate::config::Config;
use crate::cue::CueSink;
use crate::format::{format_clock, format_localized_date, HourFormat, Language};
use crate::geometry::HandAngles;
use crate::stopwatch::Stopwatch;
use crate::timer::{CountdownTimer, TimerEvent};
use crate::zones::{TimezoneSet, ZoneTime};

/// Something the shell should show the user once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The alarm fired with this message
    Alarm(String),
    TimerFinished,
}

/// Everything a shell needs to redraw after one refresh tick
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub clock: String,
    pub date: String,
    pub hands: HandAngles,
    pub zones: Vec<ZoneTime>,
    pub notices: Vec<Notice>,
    /// The hourly chime sounded on this tick
    pub chimed: bool,
}

#[derive(Debug, Clone)]
pub struct ClockSession {
    pub alarm: Alarm,
    pub timer: CountdownTimer,
    pub stopwatch: Stopwatch,
    pub zones: TimezoneSet,
    chime: HourlyChime,
    language: Language,
    hour_format: HourFormat,
    blink: bool,
    separator_visible: bool,
}

impl Default for ClockSession {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ClockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh session from startup preferences
    pub fn from_config(config: &Config) -> Self {
        Self {
            alarm: Alarm::new(),
            timer: CountdownTimer::with_duration(config.timer.default_seconds()),
            stopwatch: Stopwatch::new(),
            zones: TimezoneSet::from_names(&config.zones.list),
            chime: HourlyChime::new(),
            language: config.display.language,
            hour_format: config.display.hour_format(),
            blink: config.display.blink,
            separator_visible: false,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn hour_format(&self) -> HourFormat {
        self.hour_format
    }

    pub fn set_hour_format(&mut self, hour_format: HourFormat) {
        self.hour_format = hour_format;
    }

    /// One refresh tick
    ///
    /// Evaluates the alarm and the hourly chime against `now_local`, then
    /// renders the clock, date, hand angles and zone table. With blinking
    /// enabled the clock separators alternate on every call.
    pub fn refresh<T>(&mut self, now_local: &T, now_utc: DateTime<Utc>, cues: &dyn CueSink) -> Refresh
    where
        T: Timelike + Datelike,
    {
        let mut notices = Vec::new();

        if let AlarmEvent::Fired { message } = self.alarm.evaluate(now_local, cues) {
            notices.push(Notice::Alarm(message));
        }
        let chimed = self.chime.evaluate(now_local, cues);

        self.separator_visible = !self.blink || !self.separator_visible;

        Refresh {
            clock: format_clock(now_local, self.hour_format, self.separator_visible),
            date: format_localized_date(now_local, self.language),
            hands: HandAngles::from_time(now_local),
            zones: self.zones.refresh(now_utc),
            notices,
            chimed,
        }
    }

    /// One timer second; returns a notice when the countdown reaches zero
    pub fn timer_second(&mut self, cues: &dyn CueSink) -> Option<Notice> {
        match self.timer.tick(cues) {
            TimerEvent::Expired => Some(Notice::TimerFinished),
            TimerEvent::Idle | TimerEvent::Ticked { .. } => None,
        }
    }
}
