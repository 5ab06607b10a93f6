//! Support Ticket Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Ticket UUID
pub type TicketUuid = TypedUuid<TicketRecord>;

/// Ticket Message UUID
pub type TicketMessageUuid = TypedUuid<TicketMessageRecord>;

#[derive(Debug, Clone)]
pub struct TicketRecord {
    pub uuid: TicketUuid,
    pub user_uuid: UserUuid,
    pub user_email: String,
    pub subject: String,
    pub status: TicketStatus,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

/// One message in a ticket thread. Append-only.
#[derive(Debug, Clone)]
pub struct TicketMessageRecord {
    pub uuid: TicketMessageUuid,
    pub ticket_uuid: TicketUuid,
    pub sender_uuid: UserUuid,
    pub content: String,
    pub created_at: Timestamp,
}

/// A ticket together with its messages in chronological order.
#[derive(Debug, Clone)]
pub struct TicketWithMessages {
    pub ticket: TicketRecord,
    pub messages: Vec<TicketMessageRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownTicketStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownTicketStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown ticket status: {0}")]
pub struct UnknownTicketStatus(String);
