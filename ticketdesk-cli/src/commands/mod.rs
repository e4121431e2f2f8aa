//! Command implementations for the ticketdesk CLI

pub mod serve;
pub mod tickets;

// Re-export main dispatcher functions for flat access from main.rs
pub use serve::run_serve;
pub use tickets::run_tickets;
