//! PayPal sandbox gateway.
//!
//! Creates and captures CAPTURE-intent orders. No settlement, refunds,
//! or webhooks.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Maximum order amount in minor units.
pub const MAX_AMOUNT_MINOR: u64 = 10_000_000;

/// Minor units per major unit (3-decimal currency).
const MINOR_PER_MAJOR: u64 = 1_000;

/// Configuration for the PayPal REST API.
#[derive(Debug, Clone)]
pub struct PaypalConfig {
    /// API base, e.g. `"https://api-m.sandbox.paypal.com"`.
    pub api_url: String,

    pub client_id: String,
    pub secret: String,

    /// Currency code for created orders.
    pub currency: String,

    /// Shopper redirect target after approval.
    pub return_url: String,

    /// Shopper redirect target after cancelling.
    pub cancel_url: String,
}

/// A created PayPal order awaiting shopper approval.
#[derive(Debug, Clone)]
pub struct CreatedPaypalOrder {
    pub id: String,
    pub status: String,
    pub approve_url: Option<String>,
}

/// A captured PayPal order.
#[derive(Debug, Clone)]
pub struct CapturedPaypalOrder {
    pub id: String,
    pub status: String,
}

/// HTTP client for PayPal checkout operations.
#[derive(Debug, Clone)]
pub struct PaypalClient {
    config: PaypalConfig,
    http: Client,
}

impl PaypalClient {
    #[must_use]
    pub fn new(config: PaypalConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Creates a CAPTURE-intent order for `amount_minor` minor units.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero or out-of-range amount, on HTTP
    /// failure, or when PayPal responds with a non-success status.
    pub async fn create_order(
        &self,
        amount_minor: u64,
        description: Option<&str>,
    ) -> Result<CreatedPaypalOrder, PaypalError> {
        if amount_minor == 0 || amount_minor > MAX_AMOUNT_MINOR {
            return Err(PaypalError::InvalidAmount(amount_minor));
        }

        let access_token = self.obtain_access_token().await?;

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": self.config.currency,
                    "value": format_amount(amount_minor),
                },
                "description": description.map(|d| truncate(d, 127)),
            }],
            "application_context": {
                "brand_name": "Glacier Store",
                "landing_page": "NO_PREFERENCE",
                "user_action": "PAY_NOW",
                "return_url": self.config.return_url,
                "cancel_url": self.config.cancel_url,
            },
        });

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.config.api_url))
            .bearer_auth(&access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaypalError::UnexpectedResponse(format!(
                "create order failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        let approve_url = parsed
            .links
            .into_iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href);

        Ok(CreatedPaypalOrder {
            id: parsed.id,
            status: parsed.status,
            approve_url,
        })
    }

    /// Captures a previously approved order.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-success PayPal status.
    pub async fn capture_order(&self, order_id: &str) -> Result<CapturedPaypalOrder, PaypalError> {
        if order_id.is_empty() {
            return Err(PaypalError::InvalidOrderId);
        }

        let access_token = self.obtain_access_token().await?;

        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{}/capture",
                self.config.api_url, order_id
            ))
            .bearer_auth(&access_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaypalError::UnexpectedResponse(format!(
                "capture failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        Ok(CapturedPaypalOrder {
            id: parsed.id,
            status: parsed.status,
        })
    }

    async fn obtain_access_token(&self) -> Result<String, PaypalError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.config.api_url))
            .basic_auth(&self.config.client_id, Some(&self.config.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();

            return Err(PaypalError::UnexpectedResponse(format!(
                "authentication failed with status {status}"
            )));
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
    #[serde(default)]
    links: Vec<OrderLink>,
}

#[derive(Debug, Deserialize)]
struct OrderLink {
    rel: String,
    href: String,
}

/// Errors that can occur when communicating with PayPal.
#[derive(Debug, Error)]
pub enum PaypalError {
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    #[error("invalid order id")]
    InvalidOrderId,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from PayPal: {0}")]
    UnexpectedResponse(String),
}

fn format_amount(amount_minor: u64) -> String {
    format!(
        "{}.{:03}",
        amount_minor / MINOR_PER_MAJOR,
        amount_minor % MINOR_PER_MAJOR
    )
}

fn truncate(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}
