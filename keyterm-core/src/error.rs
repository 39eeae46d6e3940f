//! Error types for the aggregation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while serving a single aggregation request
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read (missing, unreadable, not a file)
    #[error("cannot read {}: {source}", path.display())]
    Access {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The request itself is malformed (client error)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The segmentation capability failed on a hit
    #[error("tokenization failed: {0}")]
    Tokenization(String),
}

impl Error {
    /// Whether the error was caused by the client's input rather than the pipeline
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
