//! External gateway clients.

pub mod assistant;
pub mod paypal;
pub mod sms;

pub use assistant::{
    AssistantAction, AssistantClient, AssistantConfig, AssistantError, ChatRole, ChatTurn,
    QueryType,
};
pub use paypal::{PaypalClient, PaypalConfig, PaypalError};
pub use sms::{SmsClient, SmsConfig, SmsError};
