//! Order Index Handler

use std::{string::ToString, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::orders::records::OrderRecord;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The buyer
    pub user_uuid: Uuid,

    /// The purchased product, when it still exists
    pub product_uuid: Option<Uuid>,

    /// Product name captured at purchase time
    pub product_name: String,

    /// Price captured at purchase time, in minor units
    pub price: u64,

    /// Payment method used at checkout
    pub payment_method: String,

    /// Payment status
    pub payment_status: String,

    /// Redemption code, grouped for display
    pub redemption_code: String,

    /// Whether the code has been redeemed
    pub is_redeemed: bool,

    /// When the code was redeemed
    pub redeemed_at: Option<String>,

    /// The date and time the order was created
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            product_uuid: order.product_uuid.map(Into::into),
            product_name: order.product_name,
            price: order.price,
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            redemption_code: order.redemption_code.to_string(),
            is_redeemed: order.is_redeemed,
            redeemed_at: order.redeemed_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The list of orders
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Returns the caller's purchase history, newest first.
#[endpoint(tags("orders"), summary = "List My Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let orders = state
        .app
        .orders
        .orders_for_user(&actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
