//! Ticket Errors

use salvo::http::StatusError;
use tracing::error;

use glacier_app::domain::tickets::TicketsServiceError;

pub(crate) fn into_status_error(error: TicketsServiceError) -> StatusError {
    match error {
        TicketsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Ticket already exists")
        }
        TicketsServiceError::NotFound => StatusError::not_found().brief("Ticket not found"),
        TicketsServiceError::TicketClosed => StatusError::conflict().brief("Ticket is closed"),
        TicketsServiceError::InvalidReference
        | TicketsServiceError::MissingRequiredData
        | TicketsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid ticket payload")
        }
        TicketsServiceError::Sql(source) => {
            error!("ticket storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
