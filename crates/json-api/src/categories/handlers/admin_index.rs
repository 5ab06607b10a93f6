//! Admin Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, index::CategoriesResponse},
    extensions::*,
    state::State,
};

/// Admin Category Index Handler
///
/// Returns every non-deleted category, active or not.
#[endpoint(
    tags("categories"),
    summary = "List Categories (admin)",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let categories = state
        .app
        .categories
        .list_categories(&actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
