//! Tickets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    tickets::{
        data::{NewTicket, NewTicketMessage},
        records::{
            TicketMessageRecord, TicketMessageUuid, TicketRecord, TicketStatus, TicketUuid,
        },
    },
    users::records::UserUuid,
};

const CREATE_TICKET_SQL: &str = include_str!("sql/create_ticket.sql");
const GET_TICKET_SQL: &str = include_str!("sql/get_ticket.sql");
const LIST_TICKETS_SQL: &str = include_str!("sql/list_tickets.sql");
const LIST_TICKETS_FOR_USER_SQL: &str = include_str!("sql/list_tickets_for_user.sql");
const CLOSE_TICKET_SQL: &str = include_str!("sql/close_ticket.sql");
const CREATE_TICKET_MESSAGE_SQL: &str = include_str!("sql/create_ticket_message.sql");
const LIST_TICKET_MESSAGES_SQL: &str = include_str!("sql/list_ticket_messages.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTicketsRepository;

impl PgTicketsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the ticket row, copying the opener's email from their
    /// profile. No profile row means no insert, surfaced as
    /// `RowNotFound`.
    pub(crate) async fn create_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        ticket: &NewTicket,
    ) -> Result<TicketRecord, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(CREATE_TICKET_SQL)
            .bind(ticket.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(&ticket.subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket: TicketUuid,
    ) -> Result<TicketRecord, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(GET_TICKET_SQL)
            .bind(ticket.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_tickets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_TICKETS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_tickets_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_TICKETS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn close_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket: TicketUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_TICKET_SQL)
            .bind(ticket.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sender: UserUuid,
        message: &NewTicketMessage,
    ) -> Result<TicketMessageRecord, sqlx::Error> {
        query_as::<Postgres, TicketMessageRecord>(CREATE_TICKET_MESSAGE_SQL)
            .bind(message.uuid.into_uuid())
            .bind(message.ticket_uuid.into_uuid())
            .bind(sender.into_uuid())
            .bind(&message.content)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_messages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket: TicketUuid,
    ) -> Result<Vec<TicketMessageRecord>, sqlx::Error> {
        query_as::<Postgres, TicketMessageRecord>(LIST_TICKET_MESSAGES_SQL)
            .bind(ticket.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TicketRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<TicketStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: TicketUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            user_email: row.try_get("user_email")?,
            subject: row.try_get("subject")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            closed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("closed_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TicketMessageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TicketMessageUuid::from_uuid(row.try_get("uuid")?),
            ticket_uuid: TicketUuid::from_uuid(row.try_get("ticket_uuid")?),
            sender_uuid: UserUuid::from_uuid(row.try_get("sender_uuid")?),
            content: row.try_get("content")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
