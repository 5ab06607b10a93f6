//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::orders::data::{CheckoutLine, CheckoutRequest};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// One cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutItemRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutBody {
    /// Payment method: `card` or `paypal`
    pub payment_method: String,

    /// Cart lines
    pub items: Vec<CheckoutItemRequest>,
}

/// One created order: the buyer keeps the code, everything else is
/// visible through the order list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatedOrderResponse {
    /// Created order UUID
    pub uuid: Uuid,

    /// Product name captured at purchase time
    pub product_name: String,

    /// Redemption code for this unit
    pub redemption_code: String,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// One entry per purchased unit
    pub orders: Vec<CreatedOrderResponse>,
}

/// Checkout Handler
///
/// Creates one order per purchased unit, each with its own redemption
/// code, atomically: a failure on any line rolls back the whole batch.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Orders created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let body = json.into_inner();

    let payment_method = body
        .payment_method
        .parse()
        .or_400("unknown payment method")?;

    let request = CheckoutRequest {
        payment_method,
        lines: body
            .items
            .into_iter()
            .map(|item| CheckoutLine {
                product_uuid: item.product_uuid.into(),
                quantity: item.quantity,
            })
            .collect(),
    };

    let orders = state
        .app
        .orders
        .checkout(&actor, request)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        orders: orders
            .into_iter()
            .map(|order| CreatedOrderResponse {
                uuid: order.uuid.into(),
                product_name: order.product_name,
                redemption_code: order.redemption_code.to_string(),
            })
            .collect(),
    }))
}
