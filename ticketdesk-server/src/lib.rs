//! ticketdesk-server: ticket CRUD over HTTP
//!
//! Translates HTTP requests on `/tickets/` into single parameterized SQL
//! statements against the `customers` table of a libSQL database.

pub mod client;
pub mod db;
pub mod http;
pub mod models;

pub use client::{ClientError, TicketClient};
pub use db::{connect, DatabaseConfig, StoreError, TicketStore};
pub use http::{run_server, ServerConfig};
pub use models::{Ticket, TicketFields, TicketFilter};
