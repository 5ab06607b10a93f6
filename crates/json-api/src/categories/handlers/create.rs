//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{extract::JsonBody, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use glacier_app::domain::categories::data::NewCategory;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            uuid: request.uuid.into(),
            name: request.name,
            description: request.description,
            display_order: request.display_order,
            icon: request.icon,
            is_active: request.is_active,
        }
    }
}

/// Category Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryCreatedResponse {
    /// Created category UUID
    pub uuid: Uuid,
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let uuid = state
        .app
        .categories
        .create_category(&actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/admin/categories/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CategoryCreatedResponse { uuid: uuid.into() }))
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
            Router::with_path("admin/categories").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_category_success() -> TestResult {
        let uuid = CategoryUuid::new();
        let category = make_category(uuid, "Streaming", 1);

        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(move |_, new| new.uuid == uuid && new.name == "Streaming")
            .return_once(move |_, _| Ok(category));

        let mut res = TestClient::post("http://example.com/admin/categories")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Streaming",
                "display_order": 1,
            }))
            .send(&make_service(categories))
            .await;

        let body: CategoryCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_conflict_returns_409() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/categories")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Streaming",
            }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
