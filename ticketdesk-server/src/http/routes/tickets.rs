//! Ticket endpoints
//!
//! Update and delete never check that the row exists. A missing id is a
//! silent no-op that still reports success.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{PendingFilter, TicketId, ValidTicket};
use crate::http::server::AppState;
use crate::models::Ticket;

/// Fixed reply to every delete
pub const DELETED_MESSAGE: &str = "Ticket deleted";

/// Delete response
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// POST /tickets/ - create a ticket
async fn create_ticket(
    State(state): State<Arc<AppState>>,
    ValidTicket(fields): ValidTicket,
) -> Result<Json<Ticket>, ApiError> {
    let ticket_id = state.store.insert(&fields).await?;
    tracing::debug!(ticket_id, "ticket created");

    Ok(Json(Ticket::new(ticket_id, fields)))
}

/// GET /tickets/?pending=<bool> - list tickets
async fn list_tickets(
    State(state): State<Arc<AppState>>,
    PendingFilter(filter): PendingFilter,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = state.store.list(filter).await?;
    Ok(Json(tickets))
}

/// PUT /tickets/{ticket_id} - replace every field of a ticket
async fn update_ticket(
    State(state): State<Arc<AppState>>,
    TicketId(ticket_id): TicketId,
    ValidTicket(fields): ValidTicket,
) -> Result<Json<Ticket>, ApiError> {
    let affected = state.store.update(ticket_id, &fields).await?;
    if affected == 0 {
        // No such row: reported as success all the same.
        tracing::debug!(ticket_id, "update matched no rows");
    }

    Ok(Json(Ticket::new(ticket_id, fields)))
}

/// DELETE /tickets/{ticket_id} - delete a ticket
async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    TicketId(ticket_id): TicketId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let affected = state.store.delete(ticket_id).await?;
    if affected == 0 {
        tracing::debug!(ticket_id, "delete matched no rows");
    }

    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE,
    }))
}

/// Ticket routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets/", get(list_tickets).post(create_ticket))
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route("/tickets/{ticket_id}", put(update_ticket).delete(delete_ticket))
}
