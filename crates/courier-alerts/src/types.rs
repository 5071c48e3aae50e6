//! Core types for the alert pipeline.
//!
//! This module provides the fundamental types used throughout the courier-alerts crate:
//! - [`Severity`]: The severity tier of an alert
//! - [`AlertStatus`]: The firing/resolved status carried on the wire
//! - [`Alert`]: A single alert notification as pushed by the monitoring system
//! - [`AlertPayload`]: The webhook request body wrapping a batch of alerts

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The severity tier of an alert.
///
/// Tiers are ordered `critical > warning > info`. Any severity label that is
/// not one of the three known tiers collapses to [`Severity::Info`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical alert, requires immediate attention.
    Critical,
    /// Warning alert, should be investigated.
    Warning,
    /// Informational alert, no action required.
    #[default]
    Info,
}

impl Severity {
    /// Parses a severity label value, case-insensitively.
    ///
    /// Unknown values collapse to [`Severity::Info`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Returns the severity as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Returns the priority of this severity (higher = more urgent).
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::Warning => 2,
            Self::Info => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status of an alert as carried on the wire.
///
/// Only the exact value `resolved` counts as resolved; `firing`, any other
/// value, and a missing field are all treated as firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// The alert condition has cleared.
    Resolved,
    /// The alert is actively firing.
    #[default]
    Firing,
    /// An unrecognized status value; rendered the same as firing.
    Unknown,
}

impl AlertStatus {
    /// Maps a wire value to a status.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "resolved" => Self::Resolved,
            "firing" => Self::Firing,
            _ => Self::Unknown,
        }
    }

    /// Returns true if the alert has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Returns the word used when rendering this status.
    #[must_use]
    pub const fn as_word(&self) -> &'static str {
        if self.is_resolved() { "RESOLVED" } else { "FIRING" }
    }
}

impl<'de> Deserialize<'de> for AlertStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => write!(f, "resolved"),
            Self::Firing => write!(f, "firing"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single alert notification as pushed by the monitoring system.
///
/// Alerts are immutable values: once received they are only moved through
/// the pipeline, never mutated. Fields the upstream sends beyond these
/// (timestamps, generator URLs) are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Labels identifying the alert (`alertname`, `severity`, `instance`, ...).
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Free-form annotations (`summary`, `description`, ...).
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    /// Firing/resolved status.
    #[serde(default)]
    pub status: AlertStatus,
}

impl Alert {
    /// Returns the severity tier, derived from the `severity` label.
    ///
    /// A missing label or an unrecognized value classifies as info.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.labels
            .get("severity")
            .map_or(Severity::Info, |value| Severity::parse(value))
    }

    /// Returns the alert name from the `alertname` label.
    #[must_use]
    pub fn name(&self) -> &str {
        self.labels.get("alertname").map_or("Unknown", String::as_str)
    }

    /// Returns the instance from the `instance` label.
    #[must_use]
    pub fn instance(&self) -> &str {
        self.labels.get("instance").map_or("unknown", String::as_str)
    }

    /// Returns the human-readable summary text.
    ///
    /// Prefers the `summary` annotation, falls back to `description`.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.annotations
            .get("summary")
            .or_else(|| self.annotations.get("description"))
            .map_or("No description", String::as_str)
    }
}

/// The webhook request body: a batch of alerts.
///
/// A missing `alerts` key deserializes as an empty batch, matching the
/// upstream webhook contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// The alerts in this notification.
    #[serde(default)]
    pub alerts: Vec<Alert>,
}
