//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the ticket, metrics and docs handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::docs;
use crate::http::handlers::{call_ticket, get_ticket, list_tickets, render_metrics};
use crate::http::middleware::track_metrics;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::ticket::TicketService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TicketService,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP front end of the ticket queue.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// `metrics` is the handle of an installed Prometheus recorder; without
    /// one `/metrics` is not routed.
    pub fn new(config: ServiceConfig, service: TicketService, metrics: Option<PrometheusHandle>) -> Self {
        let state = AppState { service, metrics };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A request that outlives `timeouts.request_secs` is answered with
    /// 504; the deadline is ours, not the client's.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/get_ticket", get(get_ticket))
            .route("/call_ticket", get(call_ticket))
            .route("/list_tickets", get(list_tickets))
            .route("/docs", get(docs::swagger_ui))
            .route("/openapi.json", get(docs::openapi_json));

        if state.metrics.is_some() {
            router = router.route("/metrics", get(render_metrics));
        }

        router
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id(req.headers()),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            queue = %self.config.queue.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, QueueStore, StoreResult, TicketNumber};
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store whose calls never complete.
    struct StalledStore;

    #[async_trait]
    impl QueueStore for StalledStore {
        async fn incr(&self, _key: &str) -> StoreResult<TicketNumber> {
            std::future::pending().await
        }

        async fn lpush(&self, _key: &str, _value: TicketNumber) -> StoreResult<u64> {
            std::future::pending().await
        }

        async fn rpop(&self, _key: &str) -> StoreResult<Option<TicketNumber>> {
            std::future::pending().await
        }

        async fn llen(&self, _key: &str) -> StoreResult<u64> {
            std::future::pending().await
        }

        async fn issue_atomic(&self, _counter_key: &str, _list_key: &str) -> StoreResult<TicketNumber> {
            std::future::pending().await
        }
    }

    fn server() -> HttpServer {
        let config = ServiceConfig::default();
        let service = TicketService::from_config(Arc::new(MemoryStore::new()), &config);
        HttpServer::new(config, service, None)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_routes() {
        let server = server();

        let (status, body) = get(server.router(), "/get_ticket").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Sure thing, your ticket has number 1. 1 people are waiting");

        let (_, body) = get(server.router(), "/call_ticket").await;
        assert_eq!(body, "Customer with ticket 1, please proceed! 0 waiting");

        let (_, body) = get(server.router(), "/list_tickets").await;
        assert_eq!(body, "0 people are waiting");
    }

    #[tokio::test]
    async fn test_unknown_route_and_disabled_metrics() {
        let server = server();
        assert_eq!(get(server.router(), "/nope").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(server.router(), "/metrics").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_deadline_answers_gateway_timeout() {
        let mut config = ServiceConfig::default();
        config.timeouts.request_secs = 1;
        let service = TicketService::from_config(Arc::new(StalledStore), &config);
        let server = HttpServer::new(config, service, None);

        let (status, _) = get(server.router(), "/list_tickets").await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_request_id_header_added() {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/list_tickets").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(crate::http::X_REQUEST_ID));
    }
}
