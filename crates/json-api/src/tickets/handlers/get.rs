//! Get Ticket Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::PathParam, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::tickets::records::{TicketMessageRecord, TicketWithMessages};

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, index::TicketResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketMessageResponse {
    /// The unique identifier of the message
    pub uuid: Uuid,

    /// Who wrote the message
    pub sender_uuid: Uuid,

    /// Message body
    pub content: String,

    /// The date and time the message was sent
    pub created_at: String,
}

impl From<TicketMessageRecord> for TicketMessageResponse {
    fn from(message: TicketMessageRecord) -> Self {
        TicketMessageResponse {
            uuid: message.uuid.into(),
            sender_uuid: message.sender_uuid.into(),
            content: message.content,
            created_at: message.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketThreadResponse {
    /// The ticket
    pub ticket: TicketResponse,

    /// Messages in chronological order
    pub messages: Vec<TicketMessageResponse>,
}

impl From<TicketWithMessages> for TicketThreadResponse {
    fn from(thread: TicketWithMessages) -> Self {
        TicketThreadResponse {
            ticket: thread.ticket.into(),
            messages: thread.messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Ticket Handler
///
/// Returns a ticket with its full message thread.
#[endpoint(tags("tickets"), summary = "Get Ticket", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    ticket: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TicketThreadResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let thread = state
        .app
        .tickets
        .get_ticket(&actor, ticket.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(thread.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use glacier_app::domain::tickets::{
        records::{TicketMessageUuid, TicketUuid},
        MockTicketsService, TicketsServiceError,
    };

    use crate::{
        test_helpers::{customer_service, Mocks, TEST_USER_UUID},
        tickets::handlers::tests::make_ticket,
    };

    use super::*;

    fn make_service(tickets: MockTicketsService) -> Service {
        customer_service(
            Mocks {
                tickets,
                ..Mocks::default()
            },
            Router::with_path("tickets/{ticket}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_thread_in_order() -> TestResult {
        let uuid = TicketUuid::new();

        let mut tickets = MockTicketsService::new();

        tickets
            .expect_get_ticket()
            .once()
            .withf(move |_, t| *t == uuid)
            .return_once(move |_, _| {
                let message = |content: &str| TicketMessageRecord {
                    uuid: TicketMessageUuid::new(),
                    ticket_uuid: uuid,
                    sender_uuid: TEST_USER_UUID,
                    content: content.to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                };

                Ok(TicketWithMessages {
                    ticket: make_ticket(uuid, TEST_USER_UUID, "Missing code"),
                    messages: vec![message("first"), message("second")],
                })
            });

        let response: TicketThreadResponse =
            TestClient::get(format!("http://example.com/tickets/{uuid}"))
                .send(&make_service(tickets))
                .await
                .take_json()
                .await?;

        assert_eq!(response.ticket.uuid, uuid.into_uuid());
        assert_eq!(response.messages.len(), 2, "expected both messages");
        assert_eq!(response.messages[0].content, "first");
        assert_eq!(response.messages[1].content, "second");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_ticket_returns_404() -> TestResult {
        let uuid = TicketUuid::new();

        let mut tickets = MockTicketsService::new();

        tickets
            .expect_get_ticket()
            .once()
            .return_once(|_, _| Err(TicketsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/tickets/{uuid}"))
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
