//! Orders service: checkout and redemption.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Actor,
    database::Db,
    domain::{
        orders::{
            code::RedemptionCode,
            data::CheckoutRequest,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid, PaymentStatus},
            repository::{NewOrderRow, PgOrdersRepository},
        },
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        actor: &Actor,
        request: CheckoutRequest,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if request.lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        if request.lines.iter().any(|line| line.quantity == 0) {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_actor_transaction(actor).await?;
        let mut created = Vec::new();

        for line in &request.lines {
            let product = self
                .products
                .get_product(&mut tx, line.product_uuid)
                .await
                .map_err(|error| match error {
                    sqlx::Error::RowNotFound => OrdersServiceError::ProductNotFound,
                    other => other.into(),
                })?;

            if !product.is_active {
                return Err(OrdersServiceError::ProductNotFound);
            }

            for _ in 0..line.quantity {
                let order = self
                    .repository
                    .create_order(
                        &mut tx,
                        &NewOrderRow {
                            uuid: OrderUuid::new(),
                            user_uuid: actor.user,
                            product_uuid: product.uuid,
                            product_name: product.name.clone(),
                            price: product.price,
                            payment_method: request.payment_method,
                            payment_status: PaymentStatus::Completed,
                            redemption_code: RedemptionCode::generate(),
                        },
                    )
                    .await?;

                created.push(order);
            }
        }

        tx.commit().await?;

        info!(
            user = %actor.user,
            orders = created.len(),
            "checkout completed"
        );

        Ok(created)
    }

    async fn orders_for_user(&self, actor: &Actor) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let orders = self
            .repository
            .list_orders_for_user(&mut tx, actor.user)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self, actor: &Actor) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn find_by_code(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let code = RedemptionCode::normalize(code).ok_or(OrdersServiceError::NotFound)?;

        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let order = self.repository.find_order_by_code(&mut tx, &code).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn redeem(
        &self,
        actor: &Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let rows_affected = self.repository.redeem_order(&mut tx, order).await?;

        // Zero rows means the order is already redeemed (or absent);
        // the follow-up read distinguishes the two and returns the row
        // unchanged, so a repeated call is a no-op.
        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if rows_affected > 0 {
            info!(order = %order, "order redeemed");
        }

        Ok(record)
    }

    async fn count_orders(&self, actor: &Actor) -> Result<i64, OrdersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let count = self.repository.count_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Creates one order row per purchased unit, each with a fresh
    /// redemption code, in a single transaction. Any failure rolls the
    /// whole batch back.
    async fn checkout(
        &self,
        actor: &Actor,
        request: CheckoutRequest,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// The buyer's purchase history.
    async fn orders_for_user(&self, actor: &Actor) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// All orders, newest first. Staff only (store policy enforced).
    async fn list_orders(&self, actor: &Actor) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Exact-match lookup on a normalized redemption code.
    async fn find_by_code(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Marks an order redeemed. Already-redeemed orders are returned
    /// unchanged; the first writer wins when two staff race.
    async fn redeem(
        &self,
        actor: &Actor,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn count_orders(&self, actor: &Actor) -> Result<i64, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use testresult::TestResult;

    use crate::{
        domain::{
            orders::{data::CheckoutLine, records::PaymentMethod},
            products::{data::ProductUpdate, records::ProductUuid, service::ProductsService},
            users::records::Role,
        },
        test::{TestContext, make_new_product},
    };

    use super::*;

    async fn seeded_product(ctx: &TestContext, name: &str, price: u64) -> ProductUuid {
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.owner, make_new_product(uuid, name, price))
            .await
            .expect("product should be created");

        uuid
    }

    fn single_line(product_uuid: ProductUuid, quantity: u32) -> CheckoutRequest {
        CheckoutRequest {
            payment_method: PaymentMethod::Card,
            lines: vec![CheckoutLine {
                product_uuid,
                quantity,
            }],
        }
    }

    #[tokio::test]
    async fn checkout_creates_one_order_per_unit_with_distinct_codes() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Nitro Boost", 5_000).await;

        let orders = ctx.orders.checkout(&buyer, single_line(product, 3)).await?;

        assert_eq!(orders.len(), 3);

        let codes: HashSet<&str> = orders
            .iter()
            .map(|o| o.redemption_code.as_str())
            .collect();

        assert_eq!(codes.len(), 3, "every unit gets its own code");

        for order in &orders {
            assert_eq!(order.product_name, "Nitro Boost");
            assert_eq!(order.price, 5_000);
            assert_eq!(order.user_uuid, buyer.user);
            assert!(!order.is_redeemed);
        }

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_empty_cart_and_zero_quantity() {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;

        let empty = CheckoutRequest {
            payment_method: PaymentMethod::Paypal,
            lines: Vec::new(),
        };

        assert!(matches!(
            ctx.orders.checkout(&buyer, empty).await,
            Err(OrdersServiceError::EmptyCart)
        ));

        assert!(matches!(
            ctx.orders
                .checkout(&buyer, single_line(ProductUuid::new(), 0))
                .await,
            Err(OrdersServiceError::InvalidQuantity)
        ));
    }

    #[tokio::test]
    async fn checkout_rolls_back_the_whole_batch_on_a_bad_line() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Server Boost", 2_500).await;

        let before = ctx.orders.count_orders(&ctx.owner).await?;

        let request = CheckoutRequest {
            payment_method: PaymentMethod::Card,
            lines: vec![
                CheckoutLine {
                    product_uuid: product,
                    quantity: 2,
                },
                CheckoutLine {
                    product_uuid: ProductUuid::new(),
                    quantity: 1,
                },
            ],
        };

        let result = ctx.orders.checkout(&buyer, request).await;

        assert!(matches!(result, Err(OrdersServiceError::ProductNotFound)));

        let after = ctx.orders.count_orders(&ctx.owner).await?;

        assert_eq!(before, after, "no orders survive a failed batch");

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_inactive_product() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let uuid = ProductUuid::new();

        let mut product = make_new_product(uuid, "Retired", 1_000);
        product.is_active = false;

        ctx.products.create_product(&ctx.owner, product).await?;

        let result = ctx.orders.checkout(&buyer, single_line(uuid, 1)).await;

        assert!(matches!(result, Err(OrdersServiceError::ProductNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn find_by_code_accepts_sloppy_input() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Gift Card", 10_000).await;

        let orders = ctx.orders.checkout(&buyer, single_line(product, 1)).await?;
        let code = orders[0].redemption_code.as_str();

        let sloppy: String = code
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let found = ctx
            .orders
            .find_by_code(&ctx.owner, &format!("  {sloppy} "))
            .await?;

        assert_eq!(found.uuid, orders[0].uuid);

        Ok(())
    }

    #[tokio::test]
    async fn order_keeps_its_purchase_snapshot_after_a_product_edit() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Spotify Premium", 4_000).await;

        let orders = ctx.orders.checkout(&buyer, single_line(product, 1)).await?;
        let code = orders[0].redemption_code.as_str().to_owned();

        let update = ProductUpdate {
            name: "Spotify Family".to_owned(),
            description: None,
            price: 9_000,
            original_price: None,
            badge: None,
            image_url: None,
            stock: 50,
            is_new: false,
            is_active: true,
            category_uuid: None,
        };

        ctx.products
            .update_product(&ctx.owner, product, update)
            .await?;

        let found = ctx.orders.find_by_code(&ctx.owner, &code).await?;

        assert_eq!(found.product_name, "Spotify Premium");
        assert_eq!(found.price, 4_000);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_code_unknown_code_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .orders
            .find_by_code(&ctx.owner, RedemptionCode::generate().as_str())
            .await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[tokio::test]
    async fn redeem_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Membership", 7_500).await;

        let orders = ctx.orders.checkout(&buyer, single_line(product, 1)).await?;
        let order = orders[0].uuid;

        let first = ctx.orders.redeem(&ctx.owner, order).await?;

        assert!(first.is_redeemed);
        assert!(first.redeemed_at.is_some());

        let second = ctx.orders.redeem(&ctx.owner, order).await?;

        assert!(second.is_redeemed);
        assert_eq!(
            first.redeemed_at, second.redeemed_at,
            "a repeated redeem leaves the timestamp alone"
        );

        Ok(())
    }

    #[tokio::test]
    async fn redeem_unknown_order_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.redeem(&ctx.owner, OrderUuid::new()).await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[tokio::test]
    async fn orders_for_user_returns_only_own_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user(Role::Customer).await;
        let other = ctx.create_user(Role::Customer).await;
        let product = seeded_product(&ctx, "Username Claim", 3_000).await;

        ctx.orders.checkout(&buyer, single_line(product, 2)).await?;
        ctx.orders.checkout(&other, single_line(product, 1)).await?;

        let own = ctx.orders.orders_for_user(&buyer).await?;

        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|o| o.user_uuid == buyer.user));

        Ok(())
    }
}
