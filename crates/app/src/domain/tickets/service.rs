//! Tickets service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Actor,
    database::Db,
    domain::tickets::{
        data::{NewTicket, NewTicketMessage},
        errors::TicketsServiceError,
        records::{
            TicketMessageRecord, TicketMessageUuid, TicketRecord, TicketStatus,
            TicketUuid, TicketWithMessages,
        },
        repository::PgTicketsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTicketsService {
    db: Db,
    repository: PgTicketsRepository,
}

impl PgTicketsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTicketsRepository::new(),
        }
    }
}

#[async_trait]
impl TicketsService for PgTicketsService {
    async fn create_ticket(
        &self,
        actor: &Actor,
        ticket: NewTicket,
    ) -> Result<TicketRecord, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let created = self
            .repository
            .create_ticket(&mut tx, actor.user, &ticket)
            .await?;

        self.repository
            .create_message(
                &mut tx,
                actor.user,
                &NewTicketMessage {
                    uuid: TicketMessageUuid::new(),
                    ticket_uuid: created.uuid,
                    content: ticket.message.clone(),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn tickets_for_user(&self, actor: &Actor) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let tickets = self
            .repository
            .list_tickets_for_user(&mut tx, actor.user)
            .await?;

        tx.commit().await?;

        Ok(tickets)
    }

    async fn list_tickets(&self, actor: &Actor) -> Result<Vec<TicketRecord>, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let tickets = self.repository.list_tickets(&mut tx).await?;

        tx.commit().await?;

        Ok(tickets)
    }

    async fn get_ticket(
        &self,
        actor: &Actor,
        ticket: TicketUuid,
    ) -> Result<TicketWithMessages, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let record = self.repository.get_ticket(&mut tx, ticket).await?;
        let messages = self.repository.list_messages(&mut tx, ticket).await?;

        tx.commit().await?;

        Ok(TicketWithMessages {
            ticket: record,
            messages,
        })
    }

    async fn append_message(
        &self,
        actor: &Actor,
        message: NewTicketMessage,
    ) -> Result<TicketMessageRecord, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let ticket = self
            .repository
            .get_ticket(&mut tx, message.ticket_uuid)
            .await?;

        if ticket.status == TicketStatus::Closed {
            return Err(TicketsServiceError::TicketClosed);
        }

        let created = self
            .repository
            .create_message(&mut tx, actor.user, &message)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn close_ticket(
        &self,
        actor: &Actor,
        ticket: TicketUuid,
    ) -> Result<TicketRecord, TicketsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        // A zero row count either means the ticket is already closed or
        // does not exist; the follow-up read settles which.
        self.repository.close_ticket(&mut tx, ticket).await?;

        let record = self.repository.get_ticket(&mut tx, ticket).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait TicketsService: Send + Sync {
    /// Opens a ticket with its first message in one transaction.
    async fn create_ticket(
        &self,
        actor: &Actor,
        ticket: NewTicket,
    ) -> Result<TicketRecord, TicketsServiceError>;

    /// The actor's own tickets, newest first.
    async fn tickets_for_user(&self, actor: &Actor)
    -> Result<Vec<TicketRecord>, TicketsServiceError>;

    /// Every ticket, newest first. Staff only (store policy enforced).
    async fn list_tickets(&self, actor: &Actor) -> Result<Vec<TicketRecord>, TicketsServiceError>;

    /// A ticket and its thread in chronological order.
    async fn get_ticket(
        &self,
        actor: &Actor,
        ticket: TicketUuid,
    ) -> Result<TicketWithMessages, TicketsServiceError>;

    /// Appends to an open ticket. Closed tickets reject new messages.
    async fn append_message(
        &self,
        actor: &Actor,
        message: NewTicketMessage,
    ) -> Result<TicketMessageRecord, TicketsServiceError>;

    /// Closes a ticket. Closing an already-closed ticket is a no-op
    /// that returns the record unchanged.
    async fn close_ticket(
        &self,
        actor: &Actor,
        ticket: TicketUuid,
    ) -> Result<TicketRecord, TicketsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::users::records::Role, test::TestContext};

    use super::*;

    fn new_ticket(subject: &str) -> NewTicket {
        NewTicket {
            uuid: TicketUuid::new(),
            subject: subject.to_string(),
            message: "Something went wrong with my order.".to_string(),
        }
    }

    #[tokio::test]
    async fn create_ticket_opens_with_first_message() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user(Role::Customer).await;

        let created = ctx
            .tickets
            .create_ticket(&customer, new_ticket("Missing code"))
            .await?;

        assert_eq!(created.status, TicketStatus::Open);
        assert!(created.closed_at.is_none());

        let full = ctx.tickets.get_ticket(&customer, created.uuid).await?;

        assert_eq!(full.messages.len(), 1);
        assert_eq!(full.messages[0].sender_uuid, customer.user);

        Ok(())
    }

    #[tokio::test]
    async fn append_message_rejected_after_close() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user(Role::Customer).await;

        let created = ctx
            .tickets
            .create_ticket(&customer, new_ticket("Refund request"))
            .await?;

        let closed = ctx.tickets.close_ticket(&ctx.owner, created.uuid).await?;

        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(closed.closed_at.is_some());

        let result = ctx
            .tickets
            .append_message(
                &customer,
                NewTicketMessage {
                    uuid: TicketMessageUuid::new(),
                    ticket_uuid: created.uuid,
                    content: "One more thing".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(TicketsServiceError::TicketClosed)));

        Ok(())
    }

    #[tokio::test]
    async fn close_ticket_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user(Role::Customer).await;

        let created = ctx
            .tickets
            .create_ticket(&customer, new_ticket("Wrong product"))
            .await?;

        let first = ctx.tickets.close_ticket(&ctx.owner, created.uuid).await?;
        let second = ctx.tickets.close_ticket(&ctx.owner, created.uuid).await?;

        assert_eq!(first.closed_at, second.closed_at);

        Ok(())
    }

    #[tokio::test]
    async fn messages_come_back_in_thread_order() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user(Role::Customer).await;

        let created = ctx
            .tickets
            .create_ticket(&customer, new_ticket("Question"))
            .await?;

        for content in ["Second message", "Third message"] {
            ctx.tickets
                .append_message(
                    &customer,
                    NewTicketMessage {
                        uuid: TicketMessageUuid::new(),
                        ticket_uuid: created.uuid,
                        content: content.to_string(),
                    },
                )
                .await?;
        }

        let full = ctx.tickets.get_ticket(&customer, created.uuid).await?;
        let contents: Vec<&str> = full.messages.iter().map(|m| m.content.as_str()).collect();

        assert_eq!(
            contents,
            vec![
                "Something went wrong with my order.",
                "Second message",
                "Third message"
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn tickets_for_user_excludes_other_users() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_user(Role::Customer).await;
        let other = ctx.create_user(Role::Customer).await;

        ctx.tickets
            .create_ticket(&customer, new_ticket("Mine"))
            .await?;
        ctx.tickets
            .create_ticket(&other, new_ticket("Theirs"))
            .await?;

        let own = ctx.tickets.tickets_for_user(&customer).await?;

        assert_eq!(own.len(), 1);
        assert_eq!(own[0].subject, "Mine");

        Ok(())
    }
}
