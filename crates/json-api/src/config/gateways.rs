//! Gateway Config

use clap::Args;

use glacier_app::gateways::{AssistantConfig, PaypalConfig, SmsConfig};

/// Assistant (chat completions) gateway settings.
#[derive(Debug, Args)]
pub struct AssistantGatewayConfig {
    /// Chat completions endpoint URL
    #[arg(
        long,
        env = "ASSISTANT_API_URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub assistant_api_url: String,

    /// Chat completions API key
    #[arg(long, env = "ASSISTANT_API_KEY", hide_env_values = true)]
    pub assistant_api_key: String,

    /// Model name sent upstream
    #[arg(long, env = "ASSISTANT_MODEL", default_value = "gpt-4o-mini")]
    pub assistant_model: String,
}

impl From<AssistantGatewayConfig> for AssistantConfig {
    fn from(config: AssistantGatewayConfig) -> Self {
        Self {
            api_url: config.assistant_api_url,
            api_key: config.assistant_api_key,
            model: config.assistant_model,
        }
    }
}

/// PayPal gateway settings.
#[derive(Debug, Args)]
pub struct PaypalGatewayConfig {
    /// PayPal API base URL
    #[arg(
        long,
        env = "PAYPAL_API_URL",
        default_value = "https://api-m.sandbox.paypal.com"
    )]
    pub paypal_api_url: String,

    /// PayPal REST client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: String,

    /// PayPal REST secret
    #[arg(long, env = "PAYPAL_SECRET", hide_env_values = true)]
    pub paypal_secret: String,

    /// Currency code for created orders
    #[arg(long, env = "PAYPAL_CURRENCY", default_value = "USD")]
    pub paypal_currency: String,

    /// Redirect target after buyer approval
    #[arg(
        long,
        env = "PAYPAL_RETURN_URL",
        default_value = "https://localhost/payment/return"
    )]
    pub paypal_return_url: String,

    /// Redirect target after buyer cancellation
    #[arg(
        long,
        env = "PAYPAL_CANCEL_URL",
        default_value = "https://localhost/payment/cancel"
    )]
    pub paypal_cancel_url: String,
}

impl From<PaypalGatewayConfig> for PaypalConfig {
    fn from(config: PaypalGatewayConfig) -> Self {
        Self {
            api_url: config.paypal_api_url,
            client_id: config.paypal_client_id,
            secret: config.paypal_secret,
            currency: config.paypal_currency,
            return_url: config.paypal_return_url,
            cancel_url: config.paypal_cancel_url,
        }
    }
}

/// SMS gateway settings.
#[derive(Debug, Args)]
pub struct SmsGatewayConfig {
    /// SMS provider endpoint URL
    #[arg(long, env = "SMS_API_URL")]
    pub sms_api_url: String,

    /// SMS provider authentication key
    #[arg(long, env = "SMS_AUTH_KEY", hide_env_values = true)]
    pub sms_auth_key: String,

    /// Registered sender name
    #[arg(long, env = "SMS_SENDER")]
    pub sms_sender: String,
}

impl From<SmsGatewayConfig> for SmsConfig {
    fn from(config: SmsGatewayConfig) -> Self {
        Self {
            api_url: config.sms_api_url,
            auth_key: config.sms_auth_key,
            sender: config.sms_sender,
        }
    }
}
