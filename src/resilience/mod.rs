//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Store primitive (INCR / LPUSH / RPOP / LLEN)
//!     → retries.rs (classify error, retry transient failures)
//!     → backoff.rs (pause before the next attempt)
//!     → last error propagated once retries are exhausted
//! ```
//!
//! # Design Decisions
//! - Only connection-level failures are retried; anything else fails fast
//! - Constant backoff by default, exponential available through config
//! - No circuit breaker: request volume is low and every call is bounded

pub mod backoff;
pub mod retries;

pub use backoff::Backoff;
pub use retries::{with_retry, RetryPolicy};
