//! Periodic task scheduler
//!
//! Replaces self-rescheduling callbacks with one explicit table of
//! "run task A every period P until cancelled". The owner asks which tasks
//! are due, runs them, and sleeps until [`Scheduler::next_deadline`].
//! Nothing here blocks or spawns.

use std::time::{Duration, Instant};

use tracing::trace;

#[derive(Debug, Clone)]
struct Entry<T> {
    task: T,
    period: Duration,
    next: Instant,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq + std::fmt::Debug> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` every `period`, first due one period after `now`
    ///
    /// Registering a task that is already scheduled replaces its period and
    /// restarts its countdown. A zero period is treated as one millisecond.
    pub fn every(&mut self, task: T, period: Duration, now: Instant) {
        let period = period.max(Duration::from_millis(1));
        self.cancel(task);
        trace!(?task, ?period, "task scheduled");
        self.entries.push(Entry {
            task,
            period,
            next: now + period,
        });
    }

    /// Schedule `task` unless it already is; keeps an existing countdown
    pub fn ensure(&mut self, task: T, period: Duration, now: Instant) {
        if !self.is_scheduled(task) {
            self.every(task, period, now);
        }
    }

    /// Stop running `task`; returns whether it was scheduled
    pub fn cancel(&mut self, task: T) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.task != task);
        before != self.entries.len()
    }

    pub fn is_scheduled(&self, task: T) -> bool {
        self.entries.iter().any(|e| e.task == task)
    }

    /// Tasks whose deadline has passed, in registration order
    ///
    /// Each due task is returned once even if several periods were missed;
    /// its next deadline moves to the first period boundary after `now`.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            if entry.next <= now {
                due.push(entry.task);
                let behind = now.duration_since(entry.next);
                let skipped = behind.as_nanos() / entry.period.as_nanos();
                let steps = u32::try_from(skipped + 1).unwrap_or(u32::MAX);
                entry.next += entry.period.saturating_mul(steps);
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.next).min()
    }

    /// How long the owner may sleep before something is due
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
