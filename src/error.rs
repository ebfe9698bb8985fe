//! Error types for profile loading and metrics computation.

use std::time::Duration;

/// Errors that can occur while loading a profile or computing its metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// An operation that needs at least one record was given none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A required numeric field is missing, zero, or otherwise unusable.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A denominator that must be positive was zero.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// A filter was given a value outside its domain.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// INSPIRE API returned an error status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the INSPIRE API (HTTP 429).
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse API response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Cache file I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias for Results using [`MetricsError`].
pub type Result<T> = std::result::Result<T, MetricsError>;
