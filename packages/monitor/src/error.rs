//! Typed errors for the listing monitor.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The binary wraps these
//! in `anyhow` with context.

use thiserror::Error;

/// Errors that can occur during a monitor run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// HTTP request failed (network, timeout, TLS)
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Notification could not be delivered
    #[error("notification failed for {page}: {source}")]
    Notify {
        page: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// State file could not be read or written
    #[error("state file error: {0}")]
    StateIo(#[from] std::io::Error),

    /// State document exists but is not valid JSON
    #[error("state document is not valid JSON: {0}")]
    StateParse(#[from] serde_json::Error),

    /// Configuration error (missing or malformed environment variables)
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl MonitorError {
    /// Shorthand for a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
