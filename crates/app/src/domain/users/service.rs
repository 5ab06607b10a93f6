//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Actor,
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{Role, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        // Bootstrap path: runs without an actor context (operator CLI).
        let mut tx = self.db.pool().begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(
        &self,
        actor: &Actor,
        user: UserUuid,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self, actor: &Actor) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_role(
        &self,
        actor: &Actor,
        user: UserUuid,
        role: Role,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let rows_affected = self.repository.set_role(&mut tx, user, role).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        let updated = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn count_users(&self, actor: &Actor) -> Result<i64, UsersServiceError> {
        let mut tx = self.db.begin_actor_transaction(actor).await?;

        let count = self.repository.count_users(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a profile and its role row. Runs outside any actor context;
    /// used by the operator CLI bootstrap path.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user with their role.
    async fn get_user(
        &self,
        actor: &Actor,
        user: UserUuid,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve all users. Staff only (enforced by the store policies).
    async fn list_users(&self, actor: &Actor) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Replace a user's role.
    async fn set_role(
        &self,
        actor: &Actor,
        user: UserUuid,
        role: Role,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Count registered users.
    async fn count_users(&self, actor: &Actor) -> Result<i64, UsersServiceError>;
}
