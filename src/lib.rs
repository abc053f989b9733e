//! Numbered-ticket queue service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod store;
pub mod ticket;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::startup::Application;
pub use lifecycle::Shutdown;
pub use ticket::TicketService;
