//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::resilience::{Backoff, RetryPolicy};

/// Root configuration for the ticket queue service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// External store connection settings.
    pub store: StoreConfig,

    /// Queue namespace and issue semantics.
    pub queue: QueueConfig,

    /// Retry configuration for store operations.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Which store implementation backs the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// In-process store, for local development only.
    Memory,
}

/// External store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Store host name or IP address.
    pub host: String,

    /// Store TCP port.
    pub port: u16,

    /// Logical database index.
    pub db: i64,

    /// Deadline for establishing one connection, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Deadline for one command response, in milliseconds.
    pub response_timeout_ms: u64,
}

impl StoreConfig {
    /// Connection target for the redis client. Any host form is accepted,
    /// including bare IPv6 addresses.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                ..RedisConnectionInfo::default()
            },
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            host: "127.0.0.1".to_string(),
            port: 6379,
            db: 0,
            connect_timeout_ms: 1000,
            response_timeout_ms: 1000,
        }
    }
}

/// Queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Queue name, used as the key prefix for the counter and the list.
    pub name: String,

    /// Issue tickets with a single store-side script instead of
    /// increment-then-push. Off by default.
    pub atomic_issue: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "DEFAULT".to_string(),
            atomic_issue: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    #[default]
    Constant,
    Exponential,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,

    /// Delay before each retry in milliseconds (base delay when exponential).
    pub backoff_ms: u64,

    /// Upper bound for exponential backoff in milliseconds.
    pub max_backoff_ms: u64,

    pub strategy: BackoffStrategy,
}

impl RetryConfig {
    /// Build the runtime retry policy.
    pub fn policy(&self) -> RetryPolicy {
        let backoff = match self.strategy {
            BackoffStrategy::Constant => Backoff::Constant(Duration::from_millis(self.backoff_ms)),
            BackoffStrategy::Exponential => Backoff::Exponential {
                base: Duration::from_millis(self.backoff_ms),
                max: Duration::from_millis(self.max_backoff_ms),
            },
        };
        RetryPolicy::new(self.max_retries, backoff)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_ms: 500,
            max_backoff_ms: 500,
            strategy: BackoffStrategy::Constant,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Environment label (dev, staging, prod), attached to every metric.
    pub environment: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Expose the `/metrics` endpoint.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
