//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ticket_queue::config::ServiceConfig;
use ticket_queue::store::{MemoryStore, QueueStore, StoreError, StoreResult, TicketNumber};
use ticket_queue::{HttpServer, Shutdown, TicketService};

/// A running service on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config suitable for tests: no metrics recorder, short backoff.
pub fn test_config(queue_name: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.queue.name = queue_name.into();
    config.retries.backoff_ms = 20;
    config.retries.max_backoff_ms = 20;
    config.observability.metrics_enabled = false;
    config
}

/// Start the HTTP server over `store`.
pub async fn start_server(config: ServiceConfig, store: Arc<dyn QueueStore>) -> TestServer {
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let service = TicketService::from_config(store, &config);
    let server = HttpServer::new(config, service, None);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown }
}

/// Integers appearing in a response body, in order.
pub fn numbers_in(body: &str) -> Vec<u64> {
    body.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().unwrap())
        .collect()
}

/// Store that fails the first `failures` calls with `error`, then behaves
/// like a [`MemoryStore`]. Counts every call.
pub struct FlakyStore {
    inner: MemoryStore,
    failures: u32,
    error: StoreError,
    calls: AtomicU32,
}

impl FlakyStore {
    pub fn new(failures: u32, error: StoreError) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures,
            error,
            calls: AtomicU32::new(0),
        }
    }

    pub fn down() -> Self {
        Self::new(u32::MAX, StoreError::Connection("connection refused".into()))
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> StoreResult<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(self.error.clone())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QueueStore for FlakyStore {
    async fn incr(&self, key: &str) -> StoreResult<TicketNumber> {
        self.check()?;
        self.inner.incr(key).await
    }

    async fn lpush(&self, key: &str, value: TicketNumber) -> StoreResult<u64> {
        self.check()?;
        self.inner.lpush(key, value).await
    }

    async fn rpop(&self, key: &str) -> StoreResult<Option<TicketNumber>> {
        self.check()?;
        self.inner.rpop(key).await
    }

    async fn llen(&self, key: &str) -> StoreResult<u64> {
        self.check()?;
        self.inner.llen(key).await
    }

    async fn issue_atomic(&self, counter_key: &str, list_key: &str) -> StoreResult<TicketNumber> {
        self.check()?;
        self.inner.issue_atomic(counter_key, list_key).await
    }
}
