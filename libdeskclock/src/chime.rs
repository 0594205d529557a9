//! Hourly chime

use chrono::Timelike;
use tracing::debug;

use crate::cue::{CueSink, CueStrength};

/// Double cue on the hour, once per hour
#[derive(Debug, Clone, Default)]
pub struct HourlyChime {
    last_hour: Option<u32>,
}

impl HourlyChime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the chime sounded on this call
    pub fn evaluate<T: Timelike>(&mut self, now: &T, cues: &dyn CueSink) -> bool {
        if now.minute() != 0 || now.second() != 0 || self.last_hour == Some(now.hour()) {
            return false;
        }
        debug!(hour = now.hour(), "hourly chime");
        cues.signal(CueStrength::Double);
        self.last_hour = Some(now.hour());
        true
    }
}
