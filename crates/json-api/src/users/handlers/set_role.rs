//! Set User Role Handler

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

use glacier_app::domain::users::records::Role;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, index::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetRoleRequest {
    /// The role to assign
    pub role: String,
}

/// Set User Role Handler
///
/// Assigns a new role to a user and returns the updated account.
#[endpoint(
    tags("users"),
    summary = "Set User Role",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    body: JsonBody<SetRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let role: Role = body
        .into_inner()
        .role
        .parse()
        .or_400("Unknown role")?;

    let updated = state
        .app
        .users
        .set_role(&actor, user.into_inner().into(), role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
