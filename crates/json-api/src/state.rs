//! State

use std::sync::Arc;

use glacier_app::{
    context::AppContext,
    gateways::{AssistantClient, PaypalClient, SmsClient},
};

/// Shared server state: the application services plus the outbound
/// gateway clients.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) assistant: AssistantClient,
    pub(crate) paypal: PaypalClient,
    pub(crate) sms: SmsClient,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        app: AppContext,
        assistant: AssistantClient,
        paypal: PaypalClient,
        sms: SmsClient,
    ) -> Self {
        Self {
            app,
            assistant,
            paypal,
            sms,
        }
    }

    #[must_use]
    pub(crate) fn shared(
        app: AppContext,
        assistant: AssistantClient,
        paypal: PaypalClient,
        sms: SmsClient,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, assistant, paypal, sms))
    }
}
