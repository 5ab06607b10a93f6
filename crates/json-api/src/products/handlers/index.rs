//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::errors::into_status_error, products::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the storefront catalog: active, non-deleted products.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_active_products()
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

    use glacier_app::domain::products::{
        records::ProductUuid, MockProductsService, ProductsServiceError,
    };

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{public_service, Mocks},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        public_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_catalog() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products.expect_list_active_products().once().return_once(move || {
            Ok(vec![
                make_product(uuid_a, "Spotify", 3000),
                make_product(uuid_b, "Shahid VIP", 4500),
            ])
        });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.products[0].uuid, uuid_a.into_uuid());
        assert_eq!(response.products[1].uuid, uuid_b.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_internal_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_active_products().once().return_once(|| {
            let Err(out_of_range) = u64::try_from(-1_i64) else {
                unreachable!("negative value cannot convert to u64");
            };

            Err(ProductsServiceError::InvalidPrice(out_of_range))
        });

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
