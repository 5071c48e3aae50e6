//! HTTP client for the monitoring system's API.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{MetricsError, Result};
use crate::types::{QueryData, QueryResponse};

/// Default timeout for query requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the liveness probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a Prometheus-style monitoring API.
///
/// Supports instant queries, range queries, and a liveness probe. Query
/// answers arrive in a `{"status": ..., "data": ...}` envelope; anything
/// other than a success status is surfaced as an error.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    base_url: String,
    api_url: String,
    http: reqwest::Client,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl MonitorClient {
    /// Creates a client for the monitoring server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_url = format!("{base_url}/api/v1");
        Self {
            base_url,
            api_url,
            http: reqwest::Client::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Sets the timeout for query requests.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the timeout for the liveness probe.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes an instant query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server reports a
    /// non-success status, or the envelope carries no data.
    pub async fn query(&self, query: &str) -> Result<QueryData> {
        debug!(query = %query, "executing instant query");

        let response = self
            .http
            .get(format!("{}/query", self.api_url))
            .query(&[("query", query)])
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        Self::unwrap_envelope(response.json::<QueryResponse>().await?)
    }

    /// Executes a range query with the given resolution step.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server reports a
    /// non-success status, or the envelope carries no data.
    pub async fn query_range(
        &self,
        query: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: &str,
    ) -> Result<QueryData> {
        debug!(query = %query, step = %step, "executing range query");

        let response = self
            .http
            .get(format!("{}/query_range", self.api_url))
            .query(&[
                ("query", query.to_string()),
                ("start", start.timestamp().to_string()),
                ("end", end.timestamp().to_string()),
                ("step", step.to_string()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;

        Self::unwrap_envelope(response.json::<QueryResponse>().await?)
    }

    /// Probes the server's liveness endpoint.
    ///
    /// Any failure (unreachable, timeout, non-2xx) reports unhealthy; the
    /// probe never errors.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/-/healthy", self.base_url);
        match self
            .http
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(url = %url, error = %e, "monitor health probe failed");
                false
            }
        }
    }

    fn unwrap_envelope(envelope: QueryResponse) -> Result<QueryData> {
        if envelope.status != "success" {
            return Err(MetricsError::QueryFailed {
                status: envelope.status,
                message: envelope.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }
        envelope.data.ok_or(MetricsError::MissingData)
    }
}
