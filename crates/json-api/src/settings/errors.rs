//! Settings Errors

use salvo::http::StatusError;
use tracing::error;

use glacier_app::domain::settings::SettingsServiceError;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::NotFound => StatusError::not_found().brief("Setting not found"),
        SettingsServiceError::InvalidReference
        | SettingsServiceError::MissingRequiredData
        | SettingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid settings payload")
        }
        SettingsServiceError::MalformedDocument(source) => {
            error!("stored settings document is malformed: {source}");

            StatusError::internal_server_error()
        }
        SettingsServiceError::Sql(source) => {
            error!("settings storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
