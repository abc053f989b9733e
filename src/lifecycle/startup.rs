//! Startup orchestration.
//!
//! Subsystems are initialized in dependency order: metrics recorder, store,
//! ticket service, HTTP server, listener. Traffic is accepted only once
//! everything else is ready.

use std::net::SocketAddr;
use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::store::{self, StoreError};
use crate::ticket::TicketService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to create store client: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// A fully wired service, bound but not yet serving.
pub struct Application {
    server: HttpServer,
    listener: TcpListener,
}

impl Application {
    /// Wire every subsystem from `config` and bind the listener.
    pub async fn build(config: ServiceConfig) -> Result<Self, StartupError> {
        let metrics_handle = if config.observability.metrics_enabled {
            let handle = metrics::init_metrics(&config.observability.environment, &config.queue.name)?;
            metrics::spawn_upkeep(handle.clone());
            Some(handle)
        } else {
            None
        };

        let store = store::from_config(&config.store)?;
        let service = TicketService::from_config(store, &config);

        tracing::info!(
            backend = ?config.store.backend,
            store = %config.store.connection_info().addr,
            queue = %config.queue.name,
            atomic_issue = config.queue.atomic_issue,
            max_retries = config.retries.max_retries,
            "Ticket service ready"
        );

        let listener = TcpListener::bind(&config.listener.bind_address).await?;
        let server = HttpServer::new(config, service, metrics_handle);

        Ok(Self { server, listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        self.server.run(self.listener, shutdown).await
    }
}
