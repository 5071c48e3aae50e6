//! Courier server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use courier_alerts::Aggregator;
use courier_metrics::MonitorClient;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::CourierConfig;
use crate::error::{ServerError, ServerResult};
use crate::routes::create_router;
use crate::state::ServerState;

/// The Courier HTTP service.
///
/// Owns the shared state (aggregator handle, optional monitor client) and
/// serves the ingestion and health endpoints.
#[derive(Debug, Clone)]
pub struct CourierServer {
    state: Arc<ServerState>,
}

impl CourierServer {
    /// Creates a server around the given aggregator.
    #[must_use]
    pub fn new(config: CourierConfig, aggregator: Aggregator) -> Self {
        let state = Arc::new(ServerState::new(config, aggregator));
        Self { state }
    }

    /// Creates a server with a monitor client for health reporting.
    #[must_use]
    pub fn with_monitor(
        config: CourierConfig,
        aggregator: Aggregator,
        monitor: MonitorClient,
    ) -> Self {
        let state = Arc::new(ServerState::with_monitor(config, aggregator, monitor));
        Self { state }
    }

    /// Returns the server state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<ServerState> {
        self.state.clone()
    }

    /// Returns a handle to the aggregation pipeline.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator {
        self.state.aggregator().clone()
    }

    /// Start the server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, path = %self.state.config().ingest_path, "Courier listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server shuts down when the provided future completes; an
    /// in-flight aggregation window is abandoned at that point.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;

        info!(addr = %addr, path = %self.state.config().ingest_path, "Courier listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        info!("Courier shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
