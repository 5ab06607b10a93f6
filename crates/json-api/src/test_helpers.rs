//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use glacier_app::{
    auth::{Actor, MockAuthService},
    context::AppContext,
    domain::{
        categories::MockCategoriesService,
        orders::MockOrdersService,
        products::MockProductsService,
        settings::MockSettingsService,
        tickets::MockTicketsService,
        users::{records::{Role, UserUuid}, MockUsersService},
    },
    gateways::{
        AssistantClient, AssistantConfig, PaypalClient, PaypalConfig, SmsClient, SmsConfig,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn customer_actor() -> Actor {
    Actor::new(TEST_USER_UUID, Role::Customer)
}

pub(crate) fn staff_actor() -> Actor {
    Actor::new(TEST_USER_UUID, Role::Admin)
}

/// One mock per service. Mocks with no expectations panic on any call,
/// so an untouched field doubles as a strictness assertion.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) orders: MockOrdersService,
    pub(crate) users: MockUsersService,
    pub(crate) tickets: MockTicketsService,
    pub(crate) settings: MockSettingsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            orders: Arc::new(self.orders),
            users: Arc::new(self.users),
            tickets: Arc::new(self.tickets),
            settings: Arc::new(self.settings),
            auth: Arc::new(self.auth),
        };

        State::shared(app, test_assistant(), test_paypal(), test_sms())
    }
}

// Gateway clients pointed at the discard port. Tests that reach them
// only exercise the client-side validation that fails before any
// request is sent.
fn test_assistant() -> AssistantClient {
    AssistantClient::new(AssistantConfig {
        api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
    })
}

fn test_paypal() -> PaypalClient {
    PaypalClient::new(PaypalConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        client_id: "test-client".to_string(),
        secret: "test-secret".to_string(),
        currency: "USD".to_string(),
        return_url: "http://127.0.0.1:9/return".to_string(),
        cancel_url: "http://127.0.0.1:9/cancel".to_string(),
    })
}

fn test_sms() -> SmsClient {
    SmsClient::new(SmsConfig {
        api_url: "http://127.0.0.1:9/send".to_string(),
        auth_key: "test-key".to_string(),
        sender: "GLACIER".to_string(),
    })
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(customer_actor());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_actor(staff_actor());
    ctrl.call_next(req, depot, res).await;
}

/// Service with state but no authenticated actor.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}

/// Service with a customer actor already in the depot.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Service with a staff actor already in the depot.
pub(crate) fn staff_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_staff)
            .push(route),
    )
}
