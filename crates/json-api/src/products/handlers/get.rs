//! Get Product Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{extract::PathParam, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Optional long description
    pub description: Option<String>,

    /// Price in minor units (3-decimal currency)
    pub price: u64,

    /// Pre-discount price in minor units, when a discount applies
    pub original_price: Option<u64>,

    /// Badge label shown on the storefront card
    pub badge: Option<String>,

    /// Image URL
    pub image_url: Option<String>,

    /// Units in stock
    pub stock: i64,

    /// Whether the product is flagged as new
    pub is_new: bool,

    /// Whether the product is visible on the storefront
    pub is_active: bool,

    /// Owning category, if any
    pub category_uuid: Option<Uuid>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            original_price: product.original_price,
            badge: product.badge,
            image_url: product.image_url,
            stock: product.stock,
            is_new: product.is_new,
            is_active: product.is_active,
            category_uuid: product.category_uuid.map(Into::into),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a storefront product. Inactive and deleted products are not
/// visible here.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_active_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
