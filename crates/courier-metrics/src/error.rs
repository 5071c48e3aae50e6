//! Error types for the courier-metrics crate.

use thiserror::Error;

/// Errors that can occur when talking to the monitoring system.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The HTTP request itself failed (connection, timeout, non-2xx).
    #[error("monitor request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success envelope status.
    #[error("monitor query failed with status {status}: {message}")]
    QueryFailed {
        /// The envelope status reported by the API.
        status: String,
        /// The error message reported by the API, if any.
        message: String,
    },

    /// The API answered success but carried no data payload.
    #[error("monitor response missing data payload")]
    MissingData,
}

/// Result type for monitor client operations.
pub type Result<T> = std::result::Result<T, MetricsError>;
