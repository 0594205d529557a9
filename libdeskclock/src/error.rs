//! Error types for deskclock

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClockError>;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed or out-of-range numeric entry for the alarm or timer
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown time zone: {0}")]
    InvalidZone(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl ClockError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ClockError::Validation(_) => 3,
            ClockError::InvalidZone(_) => 3,
            ClockError::UnsupportedLanguage(_) => 3,
            ClockError::Config(_) => 2,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
