//! External store subsystem.
//!
//! # Data Flow
//! ```text
//! TicketService
//!     → resilient.rs (queue-scoped operations, bounded retry)
//!     → QueueStore trait (raw key operations)
//!     → redis.rs (network store) | memory.rs (in-process, dev/tests)
//! ```
//!
//! # Design Decisions
//! - The store owns all queue state; nothing is cached in process
//! - Each primitive is atomic on the store side; sequences of primitives are not
//! - Connection-level errors are distinguished from command errors so only
//!   the former are retried

pub mod error;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod resilient;

use async_trait::async_trait;
use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use keys::QueueKeys;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;
pub use resilient::ResilientStore;

use crate::config::{StoreBackend, StoreConfig};

/// Ticket numbers are the counter values handed out by the store.
pub type TicketNumber = u64;

/// Raw operations against the external store.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Atomically increment `key` and return the new value.
    async fn incr(&self, key: &str) -> StoreResult<TicketNumber>;

    /// Push `value` to the head of the list at `key`; returns the new length.
    async fn lpush(&self, key: &str, value: TicketNumber) -> StoreResult<u64>;

    /// Pop from the tail of the list at `key`; `None` when empty.
    async fn rpop(&self, key: &str) -> StoreResult<Option<TicketNumber>>;

    /// Length of the list at `key`; 0 when the key does not exist.
    async fn llen(&self, key: &str) -> StoreResult<u64>;

    /// Increment `counter_key` and push the result to `list_key` in one
    /// store-side step.
    async fn issue_atomic(&self, counter_key: &str, list_key: &str) -> StoreResult<TicketNumber>;
}

/// Build the store selected by configuration.
pub fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn QueueStore>> {
    match config.backend {
        StoreBackend::Redis => Ok(Arc::new(RedisStore::open(
            config.connection_info(),
            config.connect_timeout(),
            config.response_timeout(),
        )?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-process memory store; queue state is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
