//! Ticket issuing and calling.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::observability::metrics;
use crate::store::{QueueStore, ResilientStore, StoreResult, TicketNumber};

/// A freshly issued ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedTicket {
    pub number: TicketNumber,
    /// Queue length read after the ticket was enqueued.
    pub waiting: u64,
}

/// Result of calling the next customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Called { number: TicketNumber, waiting: u64 },
    Empty,
}

/// Stateless composition of store operations for one queue.
#[derive(Clone)]
pub struct TicketService {
    store: ResilientStore,
    atomic_issue: bool,
}

impl TicketService {
    pub fn new(store: ResilientStore, atomic_issue: bool) -> Self {
        Self { store, atomic_issue }
    }

    /// Wire a service for `config.queue` on top of `store`.
    pub fn from_config(store: Arc<dyn QueueStore>, config: &ServiceConfig) -> Self {
        let client = ResilientStore::new(store, &config.queue.name, config.retries.policy());
        Self::new(client, config.queue.atomic_issue)
    }

    /// Issue a ticket: increment, enqueue, then read the queue length.
    ///
    /// The increment and the push are separate store calls unless atomic
    /// issue is enabled; a failure between them consumes a number that never
    /// reaches the queue.
    pub async fn issue_ticket(&self) -> StoreResult<IssuedTicket> {
        let number = if self.atomic_issue {
            self.store.issue_atomic().await?
        } else {
            let number = self.store.next_ticket_number().await?;
            self.store.enqueue(number).await?;
            number
        };
        let waiting = self.store.queue_length().await?;

        metrics::record_ticket_issued();
        tracing::info!(ticket = number, waiting, "Ticket issued");
        Ok(IssuedTicket { number, waiting })
    }

    /// Pop the oldest ticket, then read the remaining queue length.
    pub async fn call_next(&self) -> StoreResult<CallOutcome> {
        let ticket = self.store.dequeue().await?;
        let waiting = self.store.queue_length().await?;

        match ticket {
            Some(number) => {
                metrics::record_ticket_called();
                tracing::info!(ticket = number, waiting, "Ticket called");
                Ok(CallOutcome::Called { number, waiting })
            }
            None => {
                tracing::debug!("Call on empty queue");
                Ok(CallOutcome::Empty)
            }
        }
    }

    /// Number of waiting tickets.
    pub async fn queue_size(&self) -> StoreResult<u64> {
        self.store.queue_length().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service(store: Arc<MemoryStore>, queue: &str, atomic: bool) -> TicketService {
        let mut config = ServiceConfig::default();
        config.queue.name = queue.to_string();
        config.queue.atomic_issue = atomic;
        TicketService::from_config(store, &config)
    }

    #[tokio::test]
    async fn test_issued_numbers_strictly_increase() {
        let svc = service(Arc::new(MemoryStore::new()), "A", false);

        let mut last = 0;
        for expected_waiting in 1..=20 {
            let issued = svc.issue_ticket().await.unwrap();
            assert!(issued.number > last);
            assert_eq!(issued.waiting, expected_waiting);
            last = issued.number;
        }
    }

    #[tokio::test]
    async fn test_issue_then_call_returns_same_ticket() {
        let svc = service(Arc::new(MemoryStore::new()), "A", false);

        let first = svc.issue_ticket().await.unwrap();
        let second = svc.issue_ticket().await.unwrap();

        assert_eq!(
            svc.call_next().await.unwrap(),
            CallOutcome::Called { number: first.number, waiting: 1 }
        );
        assert_eq!(
            svc.call_next().await.unwrap(),
            CallOutcome::Called { number: second.number, waiting: 0 }
        );
    }

    #[tokio::test]
    async fn test_call_on_empty_queue() {
        let svc = service(Arc::new(MemoryStore::new()), "A", false);

        assert_eq!(svc.queue_size().await.unwrap(), 0);
        assert_eq!(svc.call_next().await.unwrap(), CallOutcome::Empty);
        assert_eq!(svc.queue_size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_queue_names_are_isolated() {
        let store = Arc::new(MemoryStore::new());
        let a = service(store.clone(), "A", false);
        let b = service(store.clone(), "B", false);

        a.issue_ticket().await.unwrap();
        a.issue_ticket().await.unwrap();

        assert_eq!(b.queue_size().await.unwrap(), 0);
        assert_eq!(b.call_next().await.unwrap(), CallOutcome::Empty);
        assert_eq!(b.issue_ticket().await.unwrap().number, 1);
        assert_eq!(a.queue_size().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_atomic_issue_matches_two_step_results() {
        let svc = service(Arc::new(MemoryStore::new()), "A", true);

        let first = svc.issue_ticket().await.unwrap();
        assert_eq!(first, IssuedTicket { number: 1, waiting: 1 });
        let second = svc.issue_ticket().await.unwrap();
        assert_eq!(second, IssuedTicket { number: 2, waiting: 2 });
        assert_eq!(
            svc.call_next().await.unwrap(),
            CallOutcome::Called { number: 1, waiting: 1 }
        );
    }
}
