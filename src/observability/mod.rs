//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, ticket service, store client produce:
//!     → logging.rs (structured log events, request spans via TraceLayer)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → /metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
