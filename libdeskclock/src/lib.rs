//! deskclock - a personal desk clock for the terminal
//!
//! This library holds the clock core: time formatting, analog face
//! geometry, the alarm, countdown timer and stopwatch state machines, and
//! the world clock table. The TUI and CLI shells drive it from their own
//! refresh loops.

pub mod alarm;
pub mod chime;
pub mod config;
pub mod cue;
pub mod error;
pub mod format;
pub mod geometry;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod stopwatch;
pub mod timer;
pub mod zones;

// Re-export commonly used types
pub use alarm::{Alarm, AlarmEvent};
pub use config::Config;
pub use cue::{CueSink, CueStrength, NullCueSink};
pub use error::{ClockError, ConfigError, Result};
pub use format::{HourFormat, Language};
pub use scheduler::Scheduler;
pub use session::{ClockSession, Notice, Refresh};
pub use stopwatch::{Lap, Stopwatch};
pub use timer::{CountdownTimer, TimerEvent, TimerState};
pub use zones::{TimezoneSet, ZoneRef, ZoneTime};
