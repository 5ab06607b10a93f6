//! User Index Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::users::records::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Login email address
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Contact phone number, when one is on file
    pub phone: Option<String>,

    /// Assigned role
    pub role: String,

    /// The date and time the account was created
    pub created_at: String,

    /// The date and time the account was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// User Index Handler
///
/// Returns every registered user with their current role.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let users = state
        .app
        .users
        .list_users(&actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
