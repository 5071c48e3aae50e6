//! Client for the upstream monitoring system consumed by Courier.
//!
//! The monitoring system answers point-in-time and range queries over its
//! query language and exposes a liveness probe. Courier uses the probe to
//! build the health signal reported alongside the alert pipeline; the
//! query surface is available for richer status reporting.
//!
//! # Example
//!
//! ```rust,no_run
//! use courier_metrics::MonitorClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MonitorClient::new("http://monitor:9090");
//!
//!     if client.check_health().await {
//!         let data = client.query("up").await.unwrap();
//!         println!("{} series", data.result.len());
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod error;
pub mod types;

// Re-export main types at crate root
pub use client::{MonitorClient, DEFAULT_PROBE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use error::{MetricsError, Result};
pub use types::{QueryData, QueryResponse, Sample, Series};
