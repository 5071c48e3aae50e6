//! Error types for the courier-alerts crate.

use thiserror::Error;

/// Errors that can occur in the alert pipeline.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Delivery to a single recipient failed.
    #[error("delivery to {recipient} failed: {reason}")]
    DeliveryFailed {
        /// The recipient whose delivery failed.
        recipient: String,
        /// The reason delivery failed.
        reason: String,
    },

    /// The subscriber directory could not produce a recipient list.
    #[error("subscriber directory unavailable: {reason}")]
    DirectoryUnavailable {
        /// The reason the directory is unavailable.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for alert pipeline operations.
pub type Result<T> = std::result::Result<T, AlertError>;
