//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Actor,
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_active_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        self.repository
            .list_active_products(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn get_active_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let record = self
            .repository
            .get_product_from_pool(self.db.pool(), product)
            .await?;

        if !record.is_active {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(record)
    }

    async fn list_products(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn count_products(&self, actor: &Actor) -> Result<i64, ProductsServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let count = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Storefront catalog: active, non-deleted products. Public read.
    async fn list_active_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Storefront product page. Public read; inactive products are hidden.
    async fn get_active_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Admin catalog: every non-deleted product, active or not.
    async fn list_products(&self, actor: &Actor)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product regardless of active flag.
    async fn get_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's editable fields.
    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Historical orders keep their snapshot and
    /// their product reference stays resolvable.
    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Count non-deleted products.
    async fn count_products(&self, actor: &Actor) -> Result<i64, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, make_new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_created_record() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(&ctx.owner, make_new_product(uuid, "Premium Username", 5000))
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Premium Username");
        assert_eq!(product.price, 5000);
        assert!(product.is_active);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(&ctx.owner, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn storefront_list_hides_inactive_products() -> TestResult {
        let ctx = TestContext::new().await;
        let active = ProductUuid::new();
        let inactive = ProductUuid::new();

        ctx.products
            .create_product(&ctx.owner, make_new_product(active, "Visible", 1000))
            .await?;

        let mut hidden = make_new_product(inactive, "Hidden", 2000);
        hidden.is_active = false;

        ctx.products.create_product(&ctx.owner, hidden).await?;

        let storefront = ctx.products.list_active_products().await?;
        let uuids: Vec<ProductUuid> = storefront.iter().map(|p| p.uuid).collect();

        assert!(uuids.contains(&active), "active product should be listed");
        assert!(!uuids.contains(&inactive), "inactive product should be hidden");

        Ok(())
    }

    #[tokio::test]
    async fn admin_list_includes_inactive_products() -> TestResult {
        let ctx = TestContext::new().await;
        let inactive = ProductUuid::new();

        let mut product = make_new_product(inactive, "Paused", 2000);
        product.is_active = false;

        ctx.products.create_product(&ctx.owner, product).await?;

        let all = ctx.products.list_products(&ctx.owner).await?;

        assert!(
            all.iter().any(|p| p.uuid == inactive),
            "admin list should include inactive products"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.owner, make_new_product(uuid, "Before", 500))
            .await?;

        let updated = ctx
            .products
            .update_product(
                &ctx.owner,
                uuid,
                ProductUpdate {
                    name: "After".to_string(),
                    description: Some("now discounted".to_string()),
                    price: 750,
                    original_price: Some(1000),
                    badge: Some("sale".to_string()),
                    image_url: None,
                    stock: 3,
                    is_new: false,
                    is_active: true,
                    category_uuid: None,
                },
            )
            .await?;

        assert_eq!(updated.name, "After");
        assert_eq!(updated.price, 750);
        assert_eq!(updated.original_price, Some(1000));

        Ok(())
    }

    #[tokio::test]
    async fn delete_is_soft_and_hides_product() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.owner, make_new_product(uuid, "Doomed", 300))
            .await?;

        ctx.products.delete_product(&ctx.owner, uuid).await?;

        let result = ctx.products.get_product(&ctx.owner, uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after soft delete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .delete_product(&ctx.owner, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.owner, make_new_product(uuid, "First", 100))
            .await?;

        let result = ctx
            .products
            .create_product(&ctx.owner, make_new_product(uuid, "Second", 200))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
