//! Key layout in the external store.

const COUNTER_PREFIX: &str = "ticket_number_";
const LIST_PREFIX: &str = "queue_";

/// Keys owned by one queue name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueKeys {
    /// Integer counter incremented for every issued ticket.
    pub counter: String,
    /// List of waiting tickets; head is newest, tail is next to call.
    pub list: String,
}

impl QueueKeys {
    pub fn new(queue_name: &str) -> Self {
        Self {
            counter: format!("{COUNTER_PREFIX}{queue_name}"),
            list: format!("{LIST_PREFIX}{queue_name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let keys = QueueKeys::new("DEFAULT");
        assert_eq!(keys.counter, "ticket_number_DEFAULT");
        assert_eq!(keys.list, "queue_DEFAULT");
    }
}
