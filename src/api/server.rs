//! HTTP server lifecycle.

use super::routes::{ApiState, router};
use crate::error::Result;
use crate::node::{ports::NodeRegistryRepository, services::NodeRegistryService};
use mockable::Clock;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;

/// Default prefix under which node routes are mounted.
pub const DEFAULT_NODES_PATH: &str = "/api/nodes";

/// Configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Prefix for node routes.
    pub nodes_path: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            nodes_path: DEFAULT_NODES_PATH.to_owned(),
        }
    }
}

/// Node registry HTTP server with graceful shutdown.
pub struct ApiServer {
    config: ApiServerConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Creates a new API server.
    #[must_use]
    pub fn new(config: ApiServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            shutdown_tx,
        }
    }

    /// Binds the configured address and serves until [`Self::shutdown`] is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] when binding or serving fails.
    pub async fn run<R, C>(&self, service: NodeRegistryService<R, C>) -> Result<()>
    where
        R: NodeRegistryRepository + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, service).await
    }

    /// Serves on an already bound listener until [`Self::shutdown`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] when serving fails.
    pub async fn serve<R, C>(
        &self,
        listener: TcpListener,
        service: NodeRegistryService<R, C>,
    ) -> Result<()>
    where
        R: NodeRegistryRepository + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let app = router(ApiState::new(service), &self.config.nodes_path);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        info!(
            addr = %listener.local_addr()?,
            nodes_path = %self.config.nodes_path,
            "node registry listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                drop(shutdown_rx.recv().await);
                info!("node registry shutting down");
            })
            .await?;
        Ok(())
    }

    /// Triggers graceful shutdown of a running server.
    pub fn shutdown(&self) {
        drop(self.shutdown_tx.send(()));
    }
}
