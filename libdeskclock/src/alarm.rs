//! Alarm state machine
//!
//! An alarm is armed for a time of day and evaluated on every refresh.
//! During the matching minute it rings once per wall-clock second; at
//! second zero it fires, surfaces its message and disarms itself. It never
//! repeats on a following day without being armed again.

use chrono::Timelike;
use tracing::{debug, info};

use crate::cue::{CueSink, CueStrength};
use crate::{ClockError, Result};

/// Outcome of one alarm evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmEvent {
    /// Nothing to do: disarmed, or not the matching minute
    Idle,
    /// Inside the matching minute, before the terminal second
    Ringing,
    /// The alarm went off and is now disarmed
    Fired { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alarm {
    hour: u32,
    minute: u32,
    message: String,
    armed: bool,
    /// Second value of the last cue, so repeated refreshes inside one
    /// second stay silent
    last_cue_second: Option<u32>,
}

impl Default for Alarm {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            message: String::new(),
            armed: false,
            last_cue_second: None,
        }
    }
}

impl Alarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the alarm
    ///
    /// # Errors
    ///
    /// Returns `ClockError::Validation` if `hour` is not in 0..=23 or
    /// `minute` is not in 0..=59. The alarm is left untouched in that case.
    pub fn arm(&mut self, hour: u32, minute: u32, message: impl Into<String>) -> Result<()> {
        if hour > 23 {
            return Err(ClockError::Validation(format!(
                "hour {} out of range (00-23)",
                hour
            )));
        }
        if minute > 59 {
            return Err(ClockError::Validation(format!(
                "minute {} out of range (00-59)",
                minute
            )));
        }

        self.hour = hour;
        self.minute = minute;
        self.message = message.into();
        self.armed = true;
        self.last_cue_second = None;
        info!(hour, minute, "alarm armed");
        Ok(())
    }

    /// Arm from user text in `HH:MM` form
    pub fn arm_from_str(&mut self, text: &str, message: impl Into<String>) -> Result<()> {
        let (hour, minute) = parse_hh_mm(text)?;
        self.arm(hour, minute, message)
    }

    pub fn disarm(&mut self) {
        if self.armed {
            debug!("alarm disarmed");
        }
        self.armed = false;
        self.last_cue_second = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Target time as (hour, minute)
    pub fn target(&self) -> (u32, u32) {
        (self.hour, self.minute)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check the alarm against the current wall-clock time
    pub fn evaluate<T: Timelike>(&mut self, now: &T, cues: &dyn CueSink) -> AlarmEvent {
        if !self.armed || now.hour() != self.hour || now.minute() != self.minute {
            return AlarmEvent::Idle;
        }

        let second = now.second();
        if self.last_cue_second != Some(second) {
            cues.signal(CueStrength::Single);
            self.last_cue_second = Some(second);
        }

        if second == 0 {
            cues.signal(CueStrength::Triple);
            let message = self.message.clone();
            info!(hour = self.hour, minute = self.minute, "alarm fired");
            self.disarm();
            return AlarmEvent::Fired { message };
        }

        AlarmEvent::Ringing
    }

    pub fn status_text(&self) -> String {
        if self.armed {
            format!("Alarm set for {:02}:{:02}", self.hour, self.minute)
        } else {
            "Alarm off".to_string()
        }
    }
}

fn parse_hh_mm(text: &str) -> Result<(u32, u32)> {
    let invalid = || ClockError::Validation(format!("'{}': use HH (00-23) and MM (00-59)", text.trim()));

    let (h, m) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hour = h.trim().parse::<u32>().map_err(|_| invalid())?;
    let minute = m.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::NullCueSink;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_fires_once_and_disarms() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut alarm = Alarm::new();
        alarm.arm(7, 30, "Wake up!").unwrap();

        let event = alarm.evaluate(&t(7, 30, 0), &tx);
        assert_eq!(
            event,
            AlarmEvent::Fired {
                message: "Wake up!".to_string()
            }
        );
        assert!(!alarm.is_armed());

        assert_eq!(alarm.evaluate(&t(7, 31, 0), &tx), AlarmEvent::Idle);
        assert_eq!(alarm.evaluate(&t(7, 30, 0), &tx), AlarmEvent::Idle);

        let cues: Vec<_> = rx.try_iter().collect();
        assert_eq!(cues, vec![CueStrength::Single, CueStrength::Triple]);
    }

    #[test]
    fn test_rings_once_per_second_in_matching_minute() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut alarm = Alarm::new();
        alarm.arm(6, 0, "").unwrap();

        // Armed mid-minute: rings but the terminal second already passed
        for s in [10, 10, 10, 11, 11, 12] {
            assert_eq!(alarm.evaluate(&t(6, 0, s), &tx), AlarmEvent::Ringing);
        }
        assert_eq!(rx.try_iter().count(), 3);
        assert!(alarm.is_armed());

        assert_eq!(alarm.evaluate(&t(6, 1, 0), &tx), AlarmEvent::Idle);
    }

    #[test]
    fn test_arm_rejects_out_of_range() {
        let mut alarm = Alarm::new();
        let err = alarm.arm(24, 0, "x").unwrap_err();
        assert!(matches!(err, ClockError::Validation(_)));
        assert!(alarm.arm(0, 60, "x").is_err());
        assert!(!alarm.is_armed());
        assert_eq!(alarm, Alarm::new());
    }

    #[test]
    fn test_failed_arm_keeps_previous_alarm() {
        let mut alarm = Alarm::new();
        alarm.arm(8, 15, "standup").unwrap();
        assert!(alarm.arm(99, 0, "bad").is_err());
        assert_eq!(alarm.target(), (8, 15));
        assert_eq!(alarm.message(), "standup");
        assert!(alarm.is_armed());
    }

    #[test]
    fn test_arm_from_str() {
        let mut alarm = Alarm::new();
        alarm.arm_from_str(" 07:05 ", "tea").unwrap();
        assert_eq!(alarm.target(), (7, 5));

        assert!(alarm.arm_from_str("7", "x").is_err());
        assert!(alarm.arm_from_str("aa:bb", "x").is_err());
        assert!(alarm.arm_from_str("23:60", "x").is_err());
        assert_eq!(alarm.target(), (7, 5));
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let mut alarm = Alarm::new();
        alarm.disarm();
        alarm.arm(1, 2, "x").unwrap();
        alarm.disarm();
        alarm.disarm();
        assert!(!alarm.is_armed());
        assert_eq!(alarm.evaluate(&t(1, 2, 0), &NullCueSink), AlarmEvent::Idle);
    }

    #[test]
    fn test_status_text() {
        let mut alarm = Alarm::new();
        assert_eq!(alarm.status_text(), "Alarm off");
        alarm.arm(7, 5, "x").unwrap();
        assert_eq!(alarm.status_text(), "Alarm set for 07:05");
    }
}
