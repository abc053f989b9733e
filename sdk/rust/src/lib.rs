//! Rust client for the ticket queue service.

mod client;

pub use client::{SdkError, TicketClient};
