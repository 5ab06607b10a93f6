//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Actor,
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory},
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_active_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        self.repository
            .list_active_categories(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn list_categories(
        &self,
        actor: &Actor,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        actor: &Actor,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Storefront groupings: active categories in display order. Public read.
    async fn list_active_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Admin view: every non-deleted category.
    async fn list_categories(
        &self,
        actor: &Actor,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        actor: &Actor,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Replaces a category's editable fields.
    async fn update_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Soft-deletes a category; products keep a null reference.
    async fn delete_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn make_category(uuid: CategoryUuid, name: &str, display_order: i64) -> NewCategory {
        NewCategory {
            uuid,
            name: name.to_string(),
            description: None,
            display_order,
            icon: Some("snowflake".to_string()),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn categories_are_listed_in_display_order() -> TestResult {
        let ctx = TestContext::new().await;

        let second = CategoryUuid::new();
        let first = CategoryUuid::new();

        ctx.categories
            .create_category(&ctx.owner, make_category(second, "Subscriptions", 2))
            .await?;
        ctx.categories
            .create_category(&ctx.owner, make_category(first, "Usernames", 1))
            .await?;

        let listed = ctx.categories.list_active_categories().await?;
        let uuids: Vec<CategoryUuid> = listed.iter().map(|c| c.uuid).collect();

        let first_pos = uuids.iter().position(|u| *u == first);
        let second_pos = uuids.iter().position(|u| *u == second);

        assert!(
            first_pos < second_pos,
            "lower display_order should come first"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_category_disappears_from_lists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CategoryUuid::new();

        ctx.categories
            .create_category(&ctx.owner, make_category(uuid, "Temporary", 1))
            .await?;

        ctx.categories.delete_category(&ctx.owner, uuid).await?;

        let listed = ctx.categories.list_categories(&ctx.owner).await?;

        assert!(
            !listed.iter().any(|c| c.uuid == uuid),
            "deleted category should not appear"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .delete_category(&ctx.owner, CategoryUuid::new())
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
