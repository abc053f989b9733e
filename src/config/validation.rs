//! Configuration validation.
//!
//! Serde handles the syntax; this module checks value ranges and collects
//! every problem instead of stopping at the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{BackoffStrategy, ServiceConfig};

/// Upper bound on configured retries; anything larger is a typo.
const MAX_RETRIES_LIMIT: u32 = 10;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("queue.name must not be empty")]
    EmptyQueueName,

    #[error("queue.name '{0}' must not contain whitespace")]
    QueueNameWhitespace(String),

    #[error("store.host must not be empty")]
    EmptyStoreHost,

    #[error("store.port must not be 0")]
    ZeroStorePort,

    #[error("store.{0} must be greater than 0")]
    ZeroStoreTimeout(&'static str),

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("retries.max_retries {value} exceeds the limit of {limit}")]
    TooManyRetries { value: u32, limit: u32 },

    #[error("retries.max_backoff_ms ({max}) is lower than retries.backoff_ms ({base})")]
    BackoffCapBelowBase { base: u64, max: u64 },
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.queue.name;
    if name.is_empty() {
        errors.push(ValidationError::EmptyQueueName);
    } else if name.chars().any(char::is_whitespace) {
        errors.push(ValidationError::QueueNameWhitespace(name.clone()));
    }

    if config.store.host.trim().is_empty() {
        errors.push(ValidationError::EmptyStoreHost);
    }
    if config.store.port == 0 {
        errors.push(ValidationError::ZeroStorePort);
    }
    if config.store.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroStoreTimeout("connect_timeout_ms"));
    }
    if config.store.response_timeout_ms == 0 {
        errors.push(ValidationError::ZeroStoreTimeout("response_timeout_ms"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let retries = &config.retries;
    if retries.max_retries > MAX_RETRIES_LIMIT {
        errors.push(ValidationError::TooManyRetries {
            value: retries.max_retries,
            limit: MAX_RETRIES_LIMIT,
        });
    }
    if retries.strategy == BackoffStrategy::Exponential && retries.max_backoff_ms < retries.backoff_ms {
        errors.push(ValidationError::BackoffCapBelowBase {
            base: retries.backoff_ms,
            max: retries.max_backoff_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
