//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query};

use crate::auth::Actor;

/// SQL used to set the caller's identity for row-level security policies.
pub const SET_ACTOR_CONTEXT_SQL: &str = "SELECT set_config('app.current_user_uuid', $1, true), \
     set_config('app.current_user_role', $2, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool, for queries that run without an actor
    /// context (public catalog and settings reads).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set the actor's identity and role for RLS
    /// policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the actor
    /// context fails.
    pub async fn begin_actor_transaction(
        &self,
        actor: &Actor,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_ACTOR_CONTEXT_SQL)
            .bind(actor.user.into_uuid().to_string())
            .bind(actor.role.as_str())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
