//! Ticket cache endpoint.

use axum::Json;
use axum::extract::State;

use jv_protocol::tickets::Ticket;

use crate::state::AppState;

/// GET /api/v1/tickets: tickets as of the last `get_tickets`/`create_ticket`.
pub async fn list_tickets(State(state): State<AppState>) -> Json<Vec<Ticket>> {
    let tickets = state.tickets.read().await;
    Json(tickets.clone())
}
