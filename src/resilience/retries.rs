//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a failed operation while the error is classified as retryable
//! - Pause between attempts according to a [`Backoff`]
//! - Give up after a fixed number of retries and return the last error
//!
//! # Design Decisions
//! - The predicate decides retryability; non-retryable errors return after
//!   exactly one attempt
//! - The combinator knows nothing about the store, so it is tested on its own

use std::fmt::Display;
use std::future::Future;

use crate::observability::metrics;
use crate::resilience::backoff::Backoff;

/// Bounded retry policy: `max_retries` retries after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self { max_retries, backoff }
    }

    /// Total number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Backoff::default())
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of retries.
///
/// `operation` names the call in logs and metrics.
pub async fn with_retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    operation: &'static str,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut retries_left = policy.max_retries;
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if retries_left > 0 && is_retryable(&err) => {
                let delay = policy.backoff.delay(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    retries_left,
                    delay = ?delay,
                    error = %err,
                    "Transient failure, retrying"
                );
                metrics::record_store_retry(operation);

                retries_left -= 1;
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                if attempt > 1 {
                    tracing::error!(operation, attempts = attempt, error = %err, "Giving up");
                }
                return Err(err);
            }
        }
    }
}
