//! Error types for livecal.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur in livecal operations.
#[derive(Error, Debug)]
pub enum LiveCalError {
    #[error("{count} events share the title '{title}', expected at most one")]
    CorrelationConflict { title: String, count: usize },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Event would end at {end} before it starts at {start}")]
    InvalidTimeOrdering {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Score feed error: {0}")]
    Feed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LiveCalError {
    /// Whether this error ends the cycle for the whole calendar, rather than
    /// just the match being reconciled.
    pub fn is_calendar_fatal(&self) -> bool {
        !matches!(
            self,
            LiveCalError::CorrelationConflict { .. } | LiveCalError::InvalidTimeOrdering { .. }
        )
    }
}

/// Result type alias for livecal operations.
pub type LiveCalResult<T> = Result<T, LiveCalError>;
