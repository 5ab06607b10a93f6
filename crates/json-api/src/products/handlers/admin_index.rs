//! Admin Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
    state::State,
};

/// Admin Product Index Handler
///
/// Returns every non-deleted product, active or not.
#[endpoint(
    tags("products"),
    summary = "List Products (admin)",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let products = state
        .app
        .products
        .list_products(&actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use glacier_app::domain::products::{records::ProductUuid, MockProductsService};

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{public_service, staff_actor, staff_service, Mocks},
    };

    use super::*;

    #[tokio::test]
    async fn test_admin_index_passes_actor_through() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|actor| *actor == staff_actor())
            .return_once(move |_| Ok(vec![make_product(uuid, "Disabled Pack", 900)]));

        let mocks = Mocks {
            products,
            ..Mocks::default()
        };

        let response: ProductsResponse = TestClient::get("http://example.com/admin/products")
            .send(&staff_service(
                mocks,
                Router::with_path("admin/products").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 1, "expected one product");
        assert_eq!(response.products[0].uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_index_without_actor_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/admin/products")
            .send(&public_service(
                Mocks::default(),
                Router::with_path("admin/products").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
