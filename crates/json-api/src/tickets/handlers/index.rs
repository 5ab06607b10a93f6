//! Ticket Index Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::tickets::records::TicketRecord;

use crate::{extensions::*, state::State, tickets::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketResponse {
    /// The unique identifier of the ticket
    pub uuid: Uuid,

    /// The user who opened the ticket
    pub user_uuid: Uuid,

    /// The opener's email, captured at creation time
    pub user_email: String,

    /// Subject line
    pub subject: String,

    /// Ticket status: `open` or `closed`
    pub status: String,

    /// The date and time the ticket was opened
    pub created_at: String,

    /// When the ticket was closed
    pub closed_at: Option<String>,
}

impl From<TicketRecord> for TicketResponse {
    fn from(ticket: TicketRecord) -> Self {
        TicketResponse {
            uuid: ticket.uuid.into(),
            user_uuid: ticket.user_uuid.into(),
            user_email: ticket.user_email,
            subject: ticket.subject,
            status: ticket.status.to_string(),
            created_at: ticket.created_at.to_string(),
            closed_at: ticket.closed_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketsResponse {
    /// The list of tickets
    pub tickets: Vec<TicketResponse>,
}

/// Ticket Index Handler
///
/// Customers see their own tickets; the store policies widen the view
/// for staff, so the same route backs the admin inbox.
#[endpoint(tags("tickets"), summary = "List Tickets", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TicketsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let tickets = if actor.is_staff() {
        state.app.tickets.list_tickets(&actor).await
    } else {
        state.app.tickets.tickets_for_user(&actor).await
    }
    .map_err(into_status_error)?;

    Ok(Json(TicketsResponse {
        tickets: tickets.into_iter().map(Into::into).collect(),
    }))
}
