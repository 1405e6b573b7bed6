//! Error types for the Events API client.

use thiserror::Error;

/// Errors that can occur when talking to the Events API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API rejected the event
    #[error("PagerDuty returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the service
    #[error("rate limited by PagerDuty: {message}")]
    RateLimited { message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}
