//! Payments Handler

use std::sync::Arc;

use salvo::{
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use glacier_app::gateways::{
    paypal::{CapturedPaypalOrder, CreatedPaypalOrder},
    PaypalError,
};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum PaymentRequest {
    /// Create a CAPTURE-intent order for the given amount
    Create {
        /// Amount in minor units (3-decimal currency)
        amount: u64,

        /// Optional order description shown on the PayPal page
        description: Option<String>,
    },

    /// Capture a previously approved order
    Capture {
        /// The PayPal order id returned by `create`
        order_id: String,
    },
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// PayPal order id
    pub id: String,

    /// PayPal order status
    pub status: String,

    /// Buyer approval URL, present after `create` only
    pub approve_url: Option<String>,
}

impl From<CreatedPaypalOrder> for PaymentResponse {
    fn from(created: CreatedPaypalOrder) -> Self {
        PaymentResponse {
            id: created.id,
            status: created.status,
            approve_url: created.approve_url,
        }
    }
}

impl From<CapturedPaypalOrder> for PaymentResponse {
    fn from(captured: CapturedPaypalOrder) -> Self {
        PaymentResponse {
            id: captured.id,
            status: captured.status,
            approve_url: None,
        }
    }
}

pub(crate) fn into_status_error(error: PaypalError) -> StatusError {
    match error {
        PaypalError::InvalidAmount(amount) => {
            StatusError::bad_request().brief(format!("Invalid amount: {amount}"))
        }
        PaypalError::InvalidOrderId => StatusError::bad_request().brief("Invalid order id"),
        PaypalError::Http(source) => {
            error!("paypal request failed: {source}");

            StatusError::bad_gateway().brief("Payment provider is unavailable")
        }
        PaypalError::UnexpectedResponse(detail) => {
            error!("paypal returned an unexpected response: {detail}");

            StatusError::bad_gateway().brief("Payment provider is unavailable")
        }
    }
}

/// Payments Handler
///
/// Proxies order creation and capture to the payment provider. The
/// checkout flow drives this in two steps around buyer approval.
#[endpoint(
    tags("payments"),
    summary = "Create or Capture Payment",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    body: JsonBody<PaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let response = match body.into_inner() {
        PaymentRequest::Create {
            amount,
            description,
        } => {
            state
                .paypal
                .create_order(amount, description.as_deref())
                .await
                .map_err(into_status_error)?
                .into()
        }
        PaymentRequest::Capture { order_id } => state
            .paypal
            .capture_order(&order_id)
            .await
            .map_err(into_status_error)?
            .into(),
    };

    Ok(Json(response))
}
