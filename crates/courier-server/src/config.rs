//! Courier service configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use courier_alerts::{DEFAULT_DELIVERY_TIMEOUT, DEFAULT_WINDOW};

/// Default ingestion path, matching the upstream webhook configuration.
pub const DEFAULT_INGEST_PATH: &str = "/alerts";

/// Configuration for the Courier service.
///
/// All values are supplied externally (arguments, environment); the
/// defaults match the reference deployment: a 30 second aggregation
/// window and the `/alerts` ingestion path.
#[derive(Debug, Clone)]
pub struct CourierConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Path the ingestion endpoint is mounted on.
    pub ingest_path: String,
    /// Aggregation window duration.
    pub window: Duration,
    /// Per-recipient delivery timeout during broadcasts.
    pub delivery_timeout: Duration,
    /// Base URL of the upstream monitoring system, if configured.
    pub monitor_url: Option<String>,
    /// Snapshot file for the subscriber store, if persistence is wanted.
    pub subscriber_file: Option<PathBuf>,
    /// Recipients seeded into the subscriber store at startup.
    pub seed_recipients: Vec<String>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9119)),
            ingest_path: DEFAULT_INGEST_PATH.to_string(),
            window: DEFAULT_WINDOW,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            monitor_url: None,
            subscriber_file: None,
            seed_recipients: Vec::new(),
        }
    }
}

impl CourierConfig {
    /// Creates a configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Sets the ingestion path. Must start with `/`.
    #[must_use]
    pub fn with_ingest_path(mut self, path: impl Into<String>) -> Self {
        self.ingest_path = path.into();
        self
    }

    /// Sets the aggregation window.
    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Sets the per-recipient delivery timeout.
    #[must_use]
    pub const fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Sets the upstream monitoring system URL.
    #[must_use]
    pub fn with_monitor_url(mut self, url: impl Into<String>) -> Self {
        self.monitor_url = Some(url.into());
        self
    }

    /// Sets the subscriber snapshot file.
    #[must_use]
    pub fn with_subscriber_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.subscriber_file = Some(path.into());
        self
    }

    /// Sets the seeded recipient list.
    #[must_use]
    pub fn with_seed_recipients(mut self, recipients: Vec<String>) -> Self {
        self.seed_recipients = recipients;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_config() {
        let config = CourierConfig::default();

        assert_eq!(config.bind_addr.port(), 9119);
        assert_eq!(config.ingest_path, "/alerts");
        assert_eq!(config.window, Duration::from_secs(30));
        assert_eq!(config.delivery_timeout, Duration::from_secs(10));
        assert!(config.monitor_url.is_none());
        assert!(config.subscriber_file.is_none());
        assert!(config.seed_recipients.is_empty());
    }

    #[test]
    fn test_config_new() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = CourierConfig::new(addr);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.ingest_path, "/alerts");
    }

    #[test]
    fn test_config_builder() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 9000);
        let config = CourierConfig::new(addr)
            .with_ingest_path("/hooks/alertmanager")
            .with_window(Duration::from_secs(60))
            .with_delivery_timeout(Duration::from_secs(5))
            .with_monitor_url("http://monitor:9090")
            .with_subscriber_file("/var/lib/courier/subscribers.json")
            .with_seed_recipients(vec!["ops-room".to_string()]);

        assert_eq!(config.ingest_path, "/hooks/alertmanager");
        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.delivery_timeout, Duration::from_secs(5));
        assert_eq!(config.monitor_url.as_deref(), Some("http://monitor:9090"));
        assert!(config.subscriber_file.is_some());
        assert_eq!(config.seed_recipients.len(), 1);
    }
}
