//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Category Handler
///
/// Soft-deletes a category. Products keep their category reference.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    state
        .app
        .categories
        .delete_category(&actor, category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use glacier_app::domain::categories::{
        records::CategoryUuid, CategoriesServiceError, MockCategoriesService,
    };

    use crate::test_helpers::{staff_service, Mocks};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        staff_service(
            Mocks {
                categories,
                ..Mocks::default()
            },
            Router::with_path("admin/categories/{category}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(move |_, u| *u == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/admin/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
