//! Response bodies and error mapping.
//!
//! The ticket service returns structured results; the prose customers see
//! is produced here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;
use crate::ticket::{CallOutcome, IssuedTicket};

pub const EMPTY_QUEUE_MESSAGE: &str = "Queue is empty";

pub fn issued_message(ticket: &IssuedTicket) -> String {
    format!(
        "Sure thing, your ticket has number {}. {} people are waiting",
        ticket.number, ticket.waiting
    )
}

pub fn call_message(outcome: &CallOutcome) -> String {
    match outcome {
        CallOutcome::Called { number, waiting } => {
            format!("Customer with ticket {number}, please proceed! {waiting} waiting")
        }
        CallOutcome::Empty => EMPTY_QUEUE_MESSAGE.to_string(),
    }
}

pub fn waiting_message(waiting: u64) -> String {
    format!("{waiting} people are waiting")
}

/// Store failure surfaced to an HTTP client.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, kind = self.0.kind(), "Request failed");
        match self.0 {
            StoreError::Connection(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Ticket store unavailable").into_response()
            }
            StoreError::Command(_) | StoreError::Protocol(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ticket store error").into_response()
            }
        }
    }
}
