//! Redis-backed store.
//!
//! # Responsibilities
//! - Hold the single process-wide connection to the store
//! - Map queue primitives onto INCR / LPUSH / RPOP / LLEN
//! - Classify client errors into transient and fatal
//!
//! # Design Decisions
//! - The connection is established lazily on first use, so the service
//!   starts even while the store is down; a failed connect is a transient
//!   error like any other
//! - `ConnectionManager` multiplexes concurrent requests over one
//!   connection and reconnects after it drops
//! - The manager makes a single connect attempt per call, bounded by the
//!   connect timeout; retrying is left to `resilience::with_retry`

use ::redis::aio::{ConnectionManager, ConnectionManagerConfig};
use ::redis::{cmd, AsyncCommands, Client, ErrorKind, IntoConnectionInfo, RedisError, Script};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::store::{QueueStore, StoreError, StoreResult, TicketNumber};

/// KEYS[1] = counter, KEYS[2] = list.
const ISSUE_SCRIPT: &str = r"
local number = redis.call('INCR', KEYS[1])
redis.call('LPUSH', KEYS[2], number)
return number
";

/// Store client for a Redis server.
pub struct RedisStore {
    client: Client,
    manager_config: ConnectionManagerConfig,
    connection: OnceCell<ConnectionManager>,
    issue_script: Script,
}

impl RedisStore {
    /// Create a client for `info` without connecting yet.
    pub fn open(
        info: impl IntoConnectionInfo,
        connect_timeout: Duration,
        response_timeout: Duration,
    ) -> StoreResult<Self> {
        let client = Client::open(info).map_err(classify)?;
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(connect_timeout)
            .set_response_timeout(response_timeout);
        Ok(Self {
            client,
            manager_config,
            connection: OnceCell::new(),
            issue_script: Script::new(ISSUE_SCRIPT),
        })
    }

    async fn connection(&self) -> StoreResult<ConnectionManager> {
        let conn = self
            .connection
            .get_or_try_init(|| async {
                let conn =
                    ConnectionManager::new_with_config(self.client.clone(), self.manager_config.clone())
                        .await?;
                tracing::info!(
                    addr = %self.client.get_connection_info().addr,
                    "Connected to store"
                );
                Ok::<_, RedisError>(conn)
            })
            .await
            .map_err(classify)?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl QueueStore for RedisStore {
    async fn incr(&self, key: &str) -> StoreResult<TicketNumber> {
        let mut conn = self.connection().await?;
        let value: TicketNumber = cmd("INCR").arg(key).query_async(&mut conn).await.map_err(classify)?;
        Ok(value)
    }

    async fn lpush(&self, key: &str, value: TicketNumber) -> StoreResult<u64> {
        let mut conn = self.connection().await?;
        let len: u64 = conn.lpush(key, value).await.map_err(classify)?;
        Ok(len)
    }

    async fn rpop(&self, key: &str) -> StoreResult<Option<TicketNumber>> {
        let mut conn = self.connection().await?;
        let value: Option<TicketNumber> = conn.rpop(key, None).await.map_err(classify)?;
        Ok(value)
    }

    async fn llen(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.connection().await?;
        let len: u64 = conn.llen(key).await.map_err(classify)?;
        Ok(len)
    }

    async fn issue_atomic(&self, counter_key: &str, list_key: &str) -> StoreResult<TicketNumber> {
        let mut conn = self.connection().await?;
        let value: TicketNumber = self
            .issue_script
            .key(counter_key)
            .key(list_key)
            .invoke_async(&mut conn)
            .await
            .map_err(classify)?;
        Ok(value)
    }
}

/// Split client errors into the retryable connection class and the rest.
fn classify(err: RedisError) -> StoreError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
        StoreError::Connection(err.to_string())
    } else if err.kind() == ErrorKind::TypeError {
        StoreError::Protocol(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}
