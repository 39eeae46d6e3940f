//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Invalid or unreadable configuration
    ConfigError(String),
    /// Request rejected before any event was produced
    InvalidRequest(String),
    /// The event stream ended with an `error` event
    StreamFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            CliError::StreamFailed(msg) => write!(f, "Aggregation failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<keyterm_core::Error> for CliError {
    fn from(error: keyterm_core::Error) -> Self {
        match error {
            keyterm_core::Error::Configuration(msg) => CliError::ConfigError(msg),
            keyterm_core::Error::InvalidRequest(msg) => CliError::InvalidRequest(msg),
            other => CliError::StreamFailed(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
