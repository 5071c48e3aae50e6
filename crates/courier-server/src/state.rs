//! Shared state for the Courier service.

use std::time::Instant;

use courier_alerts::Aggregator;
use courier_metrics::MonitorClient;

use crate::config::CourierConfig;

/// Shared state for the Courier service.
///
/// Holds the aggregator handle every ingestion request feeds into, plus
/// the optional monitor client backing the health signal.
#[derive(Debug)]
pub struct ServerState {
    /// Service configuration.
    config: CourierConfig,
    /// The alert aggregation pipeline.
    aggregator: Aggregator,
    /// Client for the upstream monitoring system, if configured.
    monitor: Option<MonitorClient>,
    /// Server start time.
    start_time: Instant,
}

impl ServerState {
    /// Creates server state around an aggregator.
    #[must_use]
    pub fn new(config: CourierConfig, aggregator: Aggregator) -> Self {
        Self {
            config,
            aggregator,
            monitor: None,
            start_time: Instant::now(),
        }
    }

    /// Creates server state with a monitor client for health reporting.
    #[must_use]
    pub fn with_monitor(
        config: CourierConfig,
        aggregator: Aggregator,
        monitor: MonitorClient,
    ) -> Self {
        Self {
            config,
            aggregator,
            monitor: Some(monitor),
            start_time: Instant::now(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Returns the aggregator handle.
    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Returns the monitor client, if configured.
    #[must_use]
    pub fn monitor(&self) -> Option<&MonitorClient> {
        self.monitor.as_ref()
    }

    /// Returns server uptime in seconds.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Returns the number of alerts awaiting the next aggregation drain.
    #[must_use]
    pub fn pending_alerts(&self) -> usize {
        self.aggregator.pending_len()
    }
}
