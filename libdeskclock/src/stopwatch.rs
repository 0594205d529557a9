//! Stopwatch with lap history
//!
//! Every operation takes the current monotonic `Instant` from the caller,
//! which keeps the stopwatch deterministic under test.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::format::format_elapsed;

/// A recorded split
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lap {
    /// 1-based
    pub index: usize,
    /// Elapsed time when the lap was taken
    pub total: Duration,
    /// Time since the previous lap, or since zero for the first one
    pub delta: Duration,
}

impl Lap {
    /// `Lap 01 | Total 00:00:01.50 | +00:00:01.50`
    pub fn describe(&self) -> String {
        format!(
            "Lap {:02} | Total {} | +{}",
            self.index,
            format_elapsed(self.total.as_secs_f64()),
            format_elapsed(self.delta.as_secs_f64())
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    started_at: Option<Instant>,
    laps: Vec<Lap>,
    last_lap_total: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start if stopped, stop if running
    pub fn toggle(&mut self, now: Instant) {
        match self.started_at.take() {
            Some(start) => {
                self.accumulated += now.saturating_duration_since(start);
                debug!(elapsed = ?self.accumulated, "stopwatch stopped");
            }
            None => {
                self.started_at = Some(now);
                debug!("stopwatch started");
            }
        }
    }

    /// Elapsed time at `now`; does not change any state
    pub fn current_total(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => self.accumulated + now.saturating_duration_since(start),
            None => self.accumulated,
        }
    }

    /// Record a split; allowed while stopped too
    pub fn lap(&mut self, now: Instant) -> Lap {
        let total = self.current_total(now);
        let lap = Lap {
            index: self.laps.len() + 1,
            total,
            delta: total.saturating_sub(self.last_lap_total),
        };
        self.last_lap_total = total;
        self.laps.push(lap);
        lap
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// `HH:MM:SS.cc` for the elapsed time at `now`
    pub fn display(&self, now: Instant) -> String {
        format_elapsed(self.current_total(now).as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lap_then_stop_then_reset() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();

        sw.toggle(t0);
        let lap = sw.lap(t0 + Duration::from_millis(1500));
        sw.toggle(t0 + Duration::from_millis(1600));

        assert_eq!(lap.index, 1);
        assert_eq!(lap.total, Duration::from_millis(1500));
        assert_eq!(lap.delta, Duration::from_millis(1500));
        assert_eq!(sw.accumulated(), Duration::from_millis(1600));

        sw.reset();
        assert_eq!(sw.accumulated(), Duration::ZERO);
        assert!(sw.laps().is_empty());
        assert!(!sw.is_running());
    }

    #[test]
    fn test_accumulates_across_runs() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();

        sw.toggle(t0);
        sw.toggle(t0 + Duration::from_secs(2));
        // Time passing while stopped is not counted
        sw.toggle(t0 + Duration::from_secs(10));
        assert_eq!(
            sw.current_total(t0 + Duration::from_secs(11)),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn test_current_total_is_a_pure_read() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.toggle(t0);
        let later = t0 + Duration::from_secs(5);
        assert_eq!(sw.current_total(later), sw.current_total(later));
        assert!(sw.is_running());
        assert_eq!(sw.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_lap_deltas_and_ordering() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.toggle(t0);
        sw.lap(t0 + Duration::from_secs(1));
        sw.lap(t0 + Duration::from_secs(4));
        sw.toggle(t0 + Duration::from_secs(5));
        // Lap while stopped captures the frozen total
        sw.lap(t0 + Duration::from_secs(30));

        let laps = sw.laps();
        assert_eq!(laps.len(), 3);
        assert_eq!(laps[1].delta, Duration::from_secs(3));
        assert_eq!(laps[2].total, Duration::from_secs(5));
        assert_eq!(laps[2].delta, Duration::from_secs(1));
        for pair in laps.windows(2) {
            assert!(pair[1].index > pair[0].index);
            assert!(pair[1].total >= pair[0].total);
        }
    }

    #[test]
    fn test_lap_describe() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.toggle(t0);
        let lap = sw.lap(t0 + Duration::from_millis(1500));
        assert_eq!(lap.describe(), "Lap 01 | Total 00:00:01.50 | +00:00:01.50");
        assert_eq!(sw.display(t0 + Duration::from_millis(1500)), "00:00:01.50");
    }
}
