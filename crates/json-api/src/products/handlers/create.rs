//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::products::data::NewProduct;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_uuid: Option<Uuid>,
}

fn default_true() -> bool {
    true
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.into(),
            name: request.name,
            description: request.description,
            price: request.price,
            original_price: request.original_price,
            badge: request.badge,
            image_url: request.image_url,
            stock: request.stock,
            is_new: request.is_new,
            is_active: request.is_active,
            category_uuid: request.category_uuid.map(Into::into),
        }
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Created product UUID
    pub uuid: Uuid,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let uuid = state
        .app
        .products
        .create_product(&actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/admin/products/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use glacier_app::domain::products::{
        records::ProductUuid, MockProductsService, ProductsServiceError,
    };

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{staff_actor, staff_service, Mocks},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        staff_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("admin/products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid, "Netflix Premium", 5000);

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |actor, new| {
                *actor == staff_actor()
                    && new.uuid == uuid
                    && new.name == "Netflix Premium"
                    && new.price == 5000
                    && new.is_active
            })
            .return_once(move |_, _| Ok(product));

        let mut res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Netflix Premium",
                "price": 5000,
                "stock": 100,
            }))
            .send(&make_service(products))
            .await;

        let body: ProductCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/admin/products/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_conflict_returns_409() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Netflix Premium",
                "price": 5000,
                "stock": 100,
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_category_returns_400() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Netflix Premium",
                "price": 5000,
                "stock": 100,
                "category_uuid": Uuid::nil(),
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
