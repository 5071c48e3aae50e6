//! Wire types for the monitoring system's query API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The response envelope wrapping every query answer.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// `success` or `error`.
    pub status: String,
    /// The result payload, present on success.
    #[serde(default)]
    pub data: Option<QueryData>,
    /// The error message, present on failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// The data payload of a successful query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    /// The shape of the result (`vector`, `matrix`, `scalar`, ...).
    #[serde(rename = "resultType")]
    pub result_type: String,
    /// One entry per matching series.
    #[serde(default)]
    pub result: Vec<Series>,
}

/// One series in a query result.
#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    /// The label set identifying this series.
    #[serde(default)]
    pub metric: HashMap<String, String>,
    /// The sample for instant queries.
    #[serde(default)]
    pub value: Option<Sample>,
    /// The samples for range queries.
    #[serde(default)]
    pub values: Vec<Sample>,
}

/// A single sample: a Unix timestamp paired with a string-encoded value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample(f64, String);

impl Sample {
    /// Creates a sample from a timestamp and value.
    #[must_use]
    pub fn new(timestamp: f64, value: impl Into<String>) -> Self {
        Self(timestamp, value.into())
    }

    /// Returns the sample timestamp as Unix seconds.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.0
    }

    /// Returns the raw string-encoded value.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.1
    }

    /// Parses the value as a float, if it is numeric.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.1.parse().ok()
    }
}
