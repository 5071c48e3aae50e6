//! Courier service binary.
//!
//! Receives alert webhooks from the monitoring system, aggregates them
//! over a debounce window, and fans digests out to subscribers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use courier_alerts::{Aggregator, Broadcaster, LogDelivery};
use courier_metrics::MonitorClient;
use courier_server::{CourierConfig, CourierServer};
use courier_subscribers::SubscriberStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line args
    let args: Vec<String> = std::env::args().collect();

    let bind_addr: SocketAddr = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| "0.0.0.0:9119".parse().expect("valid default addr"));

    let config = config_from_env(bind_addr);

    info!("Starting Courier on {}", bind_addr);
    info!("  Ingest endpoint: http://{}{}", bind_addr, config.ingest_path);
    info!(
        "  Aggregation window: {}s, {} seeded subscriber(s)",
        config.window.as_secs(),
        config.seed_recipients.len()
    );

    let store = match &config.subscriber_file {
        Some(path) => Arc::new(SubscriberStore::with_storage(
            config.seed_recipients.clone(),
            path,
        )),
        None => Arc::new(SubscriberStore::new(config.seed_recipients.clone())),
    };

    let broadcaster = Broadcaster::new(store, Arc::new(LogDelivery::default()))
        .with_delivery_timeout(config.delivery_timeout);
    let aggregator = Aggregator::new(broadcaster).with_window(config.window);

    let server = match config.monitor_url.clone() {
        Some(url) => CourierServer::with_monitor(config, aggregator, MonitorClient::new(url)),
        None => CourierServer::new(config, aggregator),
    };

    if let Err(e) = server.serve_with_shutdown(bind_addr, shutdown_signal()).await {
        error!("Courier error: {}", e);
        std::process::exit(1);
    }
}

/// Builds the configuration from the environment.
fn config_from_env(bind_addr: SocketAddr) -> CourierConfig {
    let mut config = CourierConfig::new(bind_addr);

    if let Ok(path) = std::env::var("COURIER_INGEST_PATH") {
        config = config.with_ingest_path(path);
    }
    if let Ok(secs) = std::env::var("COURIER_WINDOW_SECS") {
        if let Ok(secs) = secs.parse() {
            config = config.with_window(Duration::from_secs(secs));
        }
    }
    if let Ok(url) = std::env::var("COURIER_MONITOR_URL") {
        config = config.with_monitor_url(url);
    }
    if let Ok(path) = std::env::var("COURIER_SUBSCRIBER_FILE") {
        config = config.with_subscriber_file(path);
    }
    if let Ok(seed) = std::env::var("COURIER_SUBSCRIBERS") {
        let recipients = seed
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        config = config.with_seed_recipients(recipients);
    }

    config
}

/// Completes when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("shutdown signal received, abandoning any in-flight aggregation window");
}
