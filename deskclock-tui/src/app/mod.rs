//! Application module
//!
//! Contains the core application architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: (State, Action) -> State
//! - Tasks: Which periodic work the event loop should be running
//!
//! Clock state lives in a `ClockSession` inside `AppState`. Every action
//! that depends on time carries the time it happened, so the reducer never
//! reads a clock itself.

pub mod actions;
pub mod state;
pub mod reducer;
pub mod event;
pub mod tasks;

// Re-export commonly used types
pub use actions::{Action, Tab};
pub use state::{AppState, ClockView, EntryState, StatusBarState, UiConfig};
pub use reducer::reduce;
pub use tasks::{sync_tasks, Task};
