//! # courier-server
//!
//! HTTP ingestion service for the Courier alert pipeline.
//!
//! The service exposes the webhook endpoint the upstream monitoring system
//! pushes alert notifications to. Incoming batches are validated, buffered,
//! and debounced by the aggregation pipeline in `courier-alerts`; a health
//! endpoint reports service status and upstream monitor reachability.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use courier_alerts::{Aggregator, Broadcaster, LogDelivery};
//! use courier_server::{CourierConfig, CourierServer};
//! use courier_subscribers::SubscriberStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CourierConfig::default();
//!
//!     let store = Arc::new(SubscriberStore::new(vec!["ops-room".to_string()]));
//!     let broadcaster = Broadcaster::new(store, Arc::new(LogDelivery::default()));
//!     let aggregator = Aggregator::new(broadcaster).with_window(config.window);
//!
//!     let server = CourierServer::new(config.clone(), aggregator);
//!     // server.serve(config.bind_addr).await.unwrap();
//! }
//! ```
//!
//! ## Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `<ingest path>` (default `/alerts`) | POST | Alert webhook ingestion |
//! | `/health` | GET | Service status, pending depth, monitor reachability |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::{CourierConfig, DEFAULT_INGEST_PATH};
pub use error::{ServerError, ServerResult};
pub use handlers::HealthResponse;
pub use server::CourierServer;
pub use state::ServerState;
