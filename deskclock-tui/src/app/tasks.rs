//! Periodic tasks driven by the event loop
//!
//! The refresh tick always runs. The timer decrement and the stopwatch
//! redraw only run while their state machine does.

use std::time::{Duration, Instant};

use libdeskclock::Scheduler;

use super::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Refresh,
    TimerSecond,
    StopwatchDisplay,
}

/// Bring the schedule in line with the state after an action
pub fn sync_tasks(scheduler: &mut Scheduler<Task>, state: &AppState, now: Instant) {
    scheduler.ensure(
        Task::Refresh,
        Duration::from_millis(state.config.refresh_ms),
        now,
    );

    if state.session.timer.is_running() {
        scheduler.ensure(Task::TimerSecond, Duration::from_secs(1), now);
    } else {
        scheduler.cancel(Task::TimerSecond);
    }

    if state.session.stopwatch.is_running() {
        scheduler.ensure(
            Task::StopwatchDisplay,
            Duration::from_millis(state.config.stopwatch_ms),
            now,
        );
    } else {
        scheduler.cancel(Task::StopwatchDisplay);
    }
}
