//! Append Ticket Message Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        extract::{JsonBody, PathParam},
        ToSchema,
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::tickets::{data::NewTicketMessage, records::TicketMessageUuid};

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, get::TicketMessageResponse},
};

/// Append Message Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppendMessageRequest {
    /// Message body
    pub content: String,
}

/// Append Ticket Message Handler
///
/// Appends to an open ticket. Closed tickets reject new messages with
/// a conflict.
#[endpoint(
    tags("tickets"),
    summary = "Append Ticket Message",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Message appended"),
        (status_code = StatusCode::CONFLICT, description = "Ticket is closed"),
        (status_code = StatusCode::NOT_FOUND, description = "Ticket not found"),
    ),
)]
pub(crate) async fn handler(
    ticket: PathParam<Uuid>,
    json: JsonBody<AppendMessageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TicketMessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let message = state
        .app
        .tickets
        .append_message(
            &actor,
            NewTicketMessage {
                uuid: TicketMessageUuid::new(),
                ticket_uuid: ticket.into_inner().into(),
                content: json.into_inner().content,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(message.into()))
}
