//! Domain models with validation at construction
//!
//! Client input is validated into these types before it reaches the store.
//! Invalid input returns ValidationErrors, not panic.

pub mod ticket;
pub mod triage;
pub mod validation;

pub use ticket::{Ticket, TicketFields, TicketFilter, PENDING_STATUS};
pub use triage::{default_agents, triage, Agent, Priority, Triage};
pub use validation::{FieldDetail, ValidationError, ValidationErrors};
