//! App Router
//!
//! Three tiers. Public routes take no auth. Storefront routes sit
//! behind bearer auth and the maintenance gate. Admin routes sit behind
//! bearer auth and the staff gate but skip the maintenance gate, so the
//! admin surface stays reachable while the storefront is closed.

use salvo::Router;

use crate::{
    assistant, auth, categories, chat, healthcheck, maintenance, orders, otp, payments, products,
    settings, tickets, users,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("settings").get(settings::get::handler))
        .push(
            Router::with_path("chat")
                .hoop(maintenance::handler)
                .post(chat::handler),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(storefront_router())
                .push(admin_router()),
        )
}

fn storefront_router() -> Router {
    Router::new()
        .hoop(maintenance::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(Router::with_path("checkout").post(orders::checkout::handler))
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(Router::with_path("payments").post(payments::handler))
        .push(Router::with_path("otp").post(otp::handler))
        .push(
            Router::with_path("tickets")
                .get(tickets::index::handler)
                .post(tickets::create::handler)
                .push(
                    Router::with_path("{ticket}")
                        .get(tickets::get::handler)
                        .push(Router::with_path("messages").post(tickets::message::handler))
                        .push(Router::with_path("close").post(tickets::close::handler)),
                ),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::staff::handler)
        .push(
            Router::with_path("products")
                .get(products::admin_index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::admin_index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::admin_index::handler)
                .push(Router::with_path("{order}/redeem").post(orders::redeem::handler)),
        )
        .push(Router::with_path("codes/{code}").get(orders::lookup_code::handler))
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(Router::with_path("{user}/role").put(users::set_role::handler)),
        )
        .push(Router::with_path("settings").put(settings::update::handler))
        .push(Router::with_path("assistant").post(assistant::handler))
}
