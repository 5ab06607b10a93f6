//! Close Ticket Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, index::TicketResponse},
};

/// Close Ticket Handler
///
/// Closes a ticket. Closing an already-closed ticket is a no-op that
/// reports the existing state.
#[endpoint(
    tags("tickets"),
    summary = "Close Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ticket state after closing"),
        (status_code = StatusCode::NOT_FOUND, description = "Ticket not found"),
    ),
)]
pub(crate) async fn handler(
    ticket: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TicketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let ticket = state
        .app
        .tickets
        .close_ticket(&actor, ticket.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ticket.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use glacier_app::domain::tickets::{
        records::{TicketStatus, TicketUuid},
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
            Router::with_path("tickets/{ticket}/close").post(handler),
        )
    }

    #[tokio::test]
    async fn test_close_returns_closed_ticket() -> TestResult {
        let uuid = TicketUuid::new();

        let mut tickets = MockTicketsService::new();

        tickets
            .expect_close_ticket()
            .once()
            .withf(move |_, t| *t == uuid)
            .return_once(move |_, _| {
                let mut ticket = make_ticket(uuid, TEST_USER_UUID, "Missing code");
                ticket.status = TicketStatus::Closed;
                ticket.closed_at = Some(Timestamp::UNIX_EPOCH);

                Ok(ticket)
            });

        let response: TicketResponse =
            TestClient::post(format!("http://example.com/tickets/{uuid}/close"))
                .send(&make_service(tickets))
                .await
                .take_json()
                .await?;

        assert_eq!(response.status, "closed");
        assert!(response.closed_at.is_some(), "expected a closed timestamp");

        Ok(())
    }

    #[tokio::test]
    async fn test_close_missing_ticket_returns_404() -> TestResult {
        let uuid = TicketUuid::new();

        let mut tickets = MockTicketsService::new();

        tickets
            .expect_close_ticket()
            .once()
            .return_once(|_, _| Err(TicketsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/tickets/{uuid}/close"))
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
