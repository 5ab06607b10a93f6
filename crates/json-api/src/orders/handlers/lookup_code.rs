//! Code Lookup Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, index::OrderResponse},
    state::State,
};

/// Code Lookup Handler
///
/// Exact-match lookup of an order by its redemption code. Input is
/// normalized first, so dashes, spaces, and case do not matter.
#[endpoint(
    tags("orders"),
    summary = "Look Up Redemption Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown code"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .find_by_code(&actor, &code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use glacier_app::domain::{
        orders::{records::OrderUuid, MockOrdersService, OrdersServiceError},
        users::records::UserUuid,
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{staff_service, Mocks},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        staff_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("admin/codes/{code}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lookup_passes_raw_code_through() -> TestResult {
        let uuid = OrderUuid::new();
        let buyer = UserUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_find_by_code()
            .once()
            .withf(|_, code| code == "ABCD-1234")
            .return_once(move |_, _| Ok(make_order(uuid, buyer, "Spotify", 3000)));

        let response: OrderResponse = TestClient::get("http://example.com/admin/codes/ABCD-1234")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert!(!response.is_redeemed, "expected an unredeemed order");

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_unknown_code_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_find_by_code()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get("http://example.com/admin/codes/XXXX-XXXX")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
