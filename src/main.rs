//! Numbered-ticket queue service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌──────────────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server ──▶ http::handlers ──▶ ticket::service │
//!                              │   (axum, trace,     /get_ticket        issue / call /  │
//!                              │    request id,      /call_ticket       queue size      │
//!                              │    timeout)         /list_tickets            │          │
//!                              │                                              ▼          │
//!                              │                                   store::ResilientStore │
//!                              │                                   (resilience::with_retry)
//!                              │                                              │          │
//!                              │                                              ▼          │
//!                              │                                   store::RedisStore ────┼──▶ Redis
//!                              └──────────────────────────────────────────────────────┘
//! ```
//!
//! Command line flags override values from the optional TOML config file.

use clap::Parser;
use std::path::PathBuf;

use ticket_queue::config::{load_config, validate_config, ConfigError, ServiceConfig};
use ticket_queue::lifecycle::signals::spawn_signal_handler;
use ticket_queue::observability::logging::init_logging;
use ticket_queue::{Application, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "ticket-queue")]
#[command(about = "Numbered-ticket queue web service", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store host name or IP address
    #[arg(long)]
    redis_host: Option<String>,

    /// Store TCP port
    #[arg(long)]
    redis_port: Option<u16>,

    /// Queue name
    #[arg(long)]
    queue_name: Option<String>,

    /// Environment label
    #[arg(long)]
    env: Option<String>,

    /// HTTP bind address
    #[arg(long)]
    bind: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(host) = self.redis_host {
            config.store.host = host;
        }
        if let Some(port) = self.redis_port {
            config.store.port = port;
        }
        if let Some(name) = self.queue_name {
            config.queue.name = name;
        }
        if let Some(env) = self.env {
            config.observability.environment = env;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.observability.environment,
        bind_address = %config.listener.bind_address,
        "ticket-queue starting"
    );

    let app = Application::build(config).await?;
    tracing::info!(address = %app.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    app.run(server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
