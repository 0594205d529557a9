//! Error types for deskclock-tui
//!
//! Wraps clock core errors and terminal/IO errors for unified error
//! handling in the event loop.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Clock core error
    #[error("Clock error: {0}")]
    Clock(#[from] libdeskclock::ClockError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
