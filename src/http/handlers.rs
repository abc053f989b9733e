use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::http::response::{call_message, issued_message, waiting_message, ApiError};
use crate::http::server::AppState;

pub async fn get_ticket(State(state): State<AppState>) -> Result<String, ApiError> {
    let issued = state.service.issue_ticket().await?;
    Ok(issued_message(&issued))
}

pub async fn call_ticket(State(state): State<AppState>) -> Result<String, ApiError> {
    let outcome = state.service.call_next().await?;
    Ok(call_message(&outcome))
}

pub async fn list_tickets(State(state): State<AppState>) -> Result<String, ApiError> {
    let waiting = state.service.queue_size().await?;
    Ok(waiting_message(waiting))
}

pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics disabled").into_response(),
    }
}
