//! Error types for slot-engine operations.

use std::time::Duration;

use thiserror::Error;

/// Failure reported by a collaborator (calendar event source or free/busy
/// provider). The engine never retries these; retry policy belongs to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid upstream payload: {0}")]
    InvalidPayload(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Rejected before any collaborator call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A collaborator call failed; the whole operation fails with it.
    #[error("Failed to fetch {collaborator}: {source}")]
    UpstreamFetch {
        collaborator: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
