//! Queue-scoped store client with bounded retry.
//!
//! Every operation runs through [`with_retry`] using the same policy; only
//! [`StoreError::Connection`] is retried.

use std::sync::Arc;

use crate::observability::metrics;
use crate::resilience::{with_retry, RetryPolicy};
use crate::store::{QueueKeys, QueueStore, StoreError, StoreResult, TicketNumber};

/// Store client bound to one queue name.
#[derive(Clone)]
pub struct ResilientStore {
    store: Arc<dyn QueueStore>,
    keys: QueueKeys,
    policy: RetryPolicy,
}

impl ResilientStore {
    pub fn new(store: Arc<dyn QueueStore>, queue_name: &str, policy: RetryPolicy) -> Self {
        Self {
            store,
            keys: QueueKeys::new(queue_name),
            policy,
        }
    }

    pub fn keys(&self) -> &QueueKeys {
        &self.keys
    }

    /// Increment the queue's counter and return the new ticket number.
    pub async fn next_ticket_number(&self) -> StoreResult<TicketNumber> {
        let key = &self.keys.counter;
        self.run("next_ticket_number", || self.store.incr(key)).await
    }

    /// Push `ticket` to the head of the queue; returns the new length.
    pub async fn enqueue(&self, ticket: TicketNumber) -> StoreResult<u64> {
        let key = &self.keys.list;
        self.run("enqueue", || self.store.lpush(key, ticket)).await
    }

    /// Pop the oldest ticket; `None` when the queue is empty.
    pub async fn dequeue(&self) -> StoreResult<Option<TicketNumber>> {
        let key = &self.keys.list;
        self.run("dequeue", || self.store.rpop(key)).await
    }

    /// Number of waiting tickets; 0 for a queue that was never used.
    pub async fn queue_length(&self) -> StoreResult<u64> {
        let key = &self.keys.list;
        self.run("queue_length", || self.store.llen(key)).await
    }

    /// Increment and enqueue in a single store-side step.
    pub async fn issue_atomic(&self) -> StoreResult<TicketNumber> {
        let (counter, list) = (&self.keys.counter, &self.keys.list);
        self.run("issue_atomic", || self.store.issue_atomic(counter, list))
            .await
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, op: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = StoreResult<T>>,
    {
        let result = with_retry(&self.policy, operation, StoreError::is_transient, op).await;
        if let Err(err) = &result {
            metrics::record_store_error(operation, err.kind());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::Backoff;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Fails the first `failures` calls of every operation with `error`.
    struct FailingStore {
        inner: MemoryStore,
        failures: u32,
        error: StoreError,
        calls: AtomicU32,
    }

    impl FailingStore {
        fn new(failures: u32, error: StoreError) -> Self {
            Self {
                inner: MemoryStore::new(),
                failures,
                error,
                calls: AtomicU32::new(0),
            }
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
    impl QueueStore for FailingStore {
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

    fn client(store: Arc<FailingStore>) -> ResilientStore {
        ResilientStore::new(store, "TEST", RetryPolicy::new(3, Backoff::Constant(Duration::from_millis(500))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_masked() {
        let store = Arc::new(FailingStore::new(3, StoreError::Connection("reset".into())));
        let client = client(store.clone());

        assert_eq!(client.next_ticket_number().await.unwrap(), 1);
        assert_eq!(store.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_propagate_connection_error() {
        let store = Arc::new(FailingStore::new(4, StoreError::Connection("reset".into())));
        let client = client(store.clone());

        let err = client.enqueue(1).await.unwrap_err();
        assert_eq!(err, StoreError::Connection("reset".into()));
        assert_eq!(store.calls.load(Ordering::SeqCst), 4);
        assert_eq!(store.inner.llen("queue_TEST").await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_protocol_error_fails_fast() {
        let store = Arc::new(FailingStore::new(1, StoreError::Protocol("garbage".into())));
        let client = client(store.clone());

        assert!(matches!(client.dequeue().await, Err(StoreError::Protocol(_))));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_operations_use_queue_keys() {
        let store = Arc::new(FailingStore::new(0, StoreError::Connection(String::new())));
        let client = client(store.clone());

        let ticket = client.next_ticket_number().await.unwrap();
        assert_eq!(client.enqueue(ticket).await.unwrap(), 1);
        assert_eq!(store.inner.incr("ticket_number_TEST").await.unwrap(), 2);
        assert_eq!(store.inner.llen("queue_TEST").await.unwrap(), 1);

        assert_eq!(client.dequeue().await.unwrap(), Some(ticket));
        assert_eq!(client.dequeue().await.unwrap(), None);
        assert_eq!(client.queue_length().await.unwrap(), 0);
    }
}
