//! Alert aggregation and fan-out pipeline for Courier.
//!
//! `courier-alerts` implements the core of the service: alerts pushed by a
//! monitoring system are buffered, debounced over a fixed aggregation
//! window, grouped by severity, rendered into a single digest, and
//! broadcast to every subscriber with per-recipient failure isolation.
//!
//! # Pipeline
//!
//! ```text
//! ingest -> AlertBuffer -> (window elapses) -> ClassifiedAlerts
//!        -> digest::render -> Broadcaster -> DeliveryChannel
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use courier_alerts::{
//!     Aggregator, Alert, Broadcaster, LogDelivery, StaticDirectory,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let directory = Arc::new(StaticDirectory::new(vec!["ops-room".to_string()]));
//!     let broadcaster = Broadcaster::new(directory, Arc::new(LogDelivery::default()));
//!
//!     let aggregator = Aggregator::new(broadcaster).with_window(Duration::from_secs(30));
//!
//!     // The first alert after idle arms one window; everything arriving
//!     // before it elapses joins the same digest.
//!     aggregator.ingest(vec![Alert::default()]);
//! }
//! ```
//!
//! # Concurrency
//!
//! The buffer and the window state live behind one shared handle: arming is
//! an atomic compare-and-set, so any number of concurrent ingest calls
//! produce exactly one outstanding window task, and appends that race a
//! drain land in that batch or the next, never both and never neither.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod classify;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod types;
pub mod window;

// Re-export main types at crate root
pub use buffer::AlertBuffer;
pub use classify::ClassifiedAlerts;
pub use dispatch::{
    Broadcaster, BroadcastOutcome, DeliveryChannel, LogDelivery, StaticDirectory,
    SubscriberDirectory, DEFAULT_DELIVERY_TIMEOUT,
};
pub use error::{AlertError, Result};
pub use types::{Alert, AlertPayload, AlertStatus, Severity};
pub use window::{Aggregator, DEFAULT_WINDOW};
