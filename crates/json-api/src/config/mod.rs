//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    gateways::{AssistantGatewayConfig, PaypalGatewayConfig, SmsGatewayConfig},
    logging::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod gateways;
pub(crate) mod logging;
pub(crate) mod server;

/// Glacier JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "glacier-json", about = "Glacier JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Assistant gateway settings.
    #[command(flatten)]
    pub assistant: AssistantGatewayConfig,

    /// PayPal gateway settings.
    #[command(flatten)]
    pub paypal: PaypalGatewayConfig,

    /// SMS gateway settings.
    #[command(flatten)]
    pub sms: SmsGatewayConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
