//! Ticket input payloads.

use crate::domain::tickets::records::{TicketMessageUuid, TicketUuid};

/// New ticket with its opening message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub uuid: TicketUuid,
    pub subject: String,
    pub message: String,
}

/// A follow-up message on an existing ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketMessage {
    pub uuid: TicketMessageUuid,
    pub ticket_uuid: TicketUuid,
    pub content: String,
}
