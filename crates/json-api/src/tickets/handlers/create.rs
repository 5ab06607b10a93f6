//! Create Ticket Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use glacier_app::domain::tickets::{data::NewTicket, records::TicketUuid};

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, index::TicketResponse},
};

/// Create Ticket Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTicketRequest {
    /// Subject line
    pub subject: String,

    /// Opening message
    pub message: String,
}

/// Create Ticket Handler
///
/// Opens a ticket with its first message in one step.
#[endpoint(
    tags("tickets"),
    summary = "Create Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Ticket created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTicketRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TicketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let request = json.into_inner();

    let ticket = state
        .app
        .tickets
        .create_ticket(
            &actor,
            NewTicket {
                uuid: TicketUuid::new(),
                subject: request.subject,
                message: request.message,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/tickets/{}", ticket.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ticket.into()))
}
