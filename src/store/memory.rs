//! In-process store with the same list and counter semantics as Redis.
//!
//! Used for local development (`store.backend = "memory"`) and tests.
//! State lives only as long as the process.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::store::{QueueStore, StoreResult, TicketNumber};

#[derive(Default)]
struct State {
    counters: HashMap<String, TicketNumber>,
    lists: HashMap<String, VecDeque<TicketNumber>>,
}

/// A thread-safe in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().expect("memory store mutex poisoned");
        f(&mut state)
    }
}

impl State {
    fn incr(&mut self, key: &str) -> TicketNumber {
        let counter = self.counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    fn lpush(&mut self, key: &str, value: TicketNumber) -> u64 {
        let list = self.lists.entry(key.to_string()).or_default();
        list.push_front(value);
        list.len() as u64
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn incr(&self, key: &str) -> StoreResult<TicketNumber> {
        Ok(self.with_state(|s| s.incr(key)))
    }

    async fn lpush(&self, key: &str, value: TicketNumber) -> StoreResult<u64> {
        Ok(self.with_state(|s| s.lpush(key, value)))
    }

    async fn rpop(&self, key: &str) -> StoreResult<Option<TicketNumber>> {
        Ok(self.with_state(|s| {
            let list = s.lists.get_mut(key)?;
            let value = list.pop_back();
            // Redis deletes a list once its last element is removed.
            if list.is_empty() {
                s.lists.remove(key);
            }
            value
        }))
    }

    async fn llen(&self, key: &str) -> StoreResult<u64> {
        Ok(self.with_state(|s| s.lists.get(key).map_or(0, |l| l.len() as u64)))
    }

    async fn issue_atomic(&self, counter_key: &str, list_key: &str) -> StoreResult<TicketNumber> {
        Ok(self.with_state(|s| {
            let number = s.incr(counter_key);
            s.lpush(list_key, number);
            number
        }))
    }
}
