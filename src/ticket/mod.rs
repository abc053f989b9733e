//! Ticket service: issue, call and count tickets for the configured queue.

pub mod service;

pub use service::{CallOutcome, IssuedTicket, TicketService};
