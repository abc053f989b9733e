//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the store, ticket service and HTTP server constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the queue name is fixed for the
//!   lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BackoffStrategy, ListenerConfig, LogFormat, ObservabilityConfig, QueueConfig, RetryConfig,
    ServiceConfig, StoreBackend, StoreConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
