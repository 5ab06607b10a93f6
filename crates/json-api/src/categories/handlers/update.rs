//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        extract::{JsonBody, PathParam},
        ToSchema,
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{errors::into_status_error, index::CategoryResponse},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub icon: Option<String>,
    pub is_active: bool,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            description: request.description,
            display_order: request.display_order,
            icon: request.icon,
            is_active: request.is_active,
        }
    }
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let updated = state
        .app
        .categories
        .update_category(&actor, category.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use glacier_app::domain::categories::{
        records::CategoryUuid, CategoriesServiceError, MockCategoriesService,
    };

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{staff_service, Mocks},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        staff_service(
            Mocks {
                categories,
                ..Mocks::default()
            },
            Router::with_path("admin/categories/{category}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_returns_updated_category() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(move |_, u, update| *u == uuid && update.name == "Subscriptions")
            .return_once(move |_, _, _| Ok(make_category(uuid, "Subscriptions", 3)));

        let response: CategoryResponse =
            TestClient::put(format!("http://example.com/admin/categories/{uuid}"))
                .json(&json!({
                    "name": "Subscriptions",
                    "display_order": 3,
                    "is_active": true,
                }))
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert_eq!(response.name, "Subscriptions");
        assert_eq!(response.display_order, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/admin/categories/{uuid}"))
            .json(&json!({
                "name": "Subscriptions",
                "is_active": true,
            }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
