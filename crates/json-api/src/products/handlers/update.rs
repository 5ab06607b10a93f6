//! Update Product Handler

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

use glacier_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request (whole-row replacement, as the admin form
/// submits it)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub is_new: bool,
    pub is_active: bool,
    #[serde(default)]
    pub category_uuid: Option<Uuid>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            original_price: request.original_price,
            badge: request.badge,
            image_url: request.image_url,
            stock: request.stock,
            is_new: request.is_new,
            is_active: request.is_active,
            category_uuid: request.category_uuid.map(Into::into),
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let updated = state
        .app
        .products
        .update_product(&actor, product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
