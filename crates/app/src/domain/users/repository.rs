//! Users Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::users::{
    data::NewUser,
    records::{Role, UserRecord, UserUuid},
};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const CREATE_USER_ROLE_SQL: &str = include_str!("sql/create_user_role.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const SET_ROLE_SQL: &str = include_str!("sql/set_role.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        let (created_at, updated_at): (SqlxTimestamp, SqlxTimestamp) =
            query_as(CREATE_PROFILE_SQL)
                .bind(user.uuid.into_uuid())
                .bind(&user.email)
                .bind(&user.full_name)
                .bind(user.phone.as_deref())
                .fetch_one(&mut **tx)
                .await?;

        query(CREATE_USER_ROLE_SQL)
            .bind(Uuid::now_v7())
            .bind(user.uuid.into_uuid())
            .bind(user.role.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(UserRecord {
            uuid: user.uuid,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            created_at: created_at.to_jiff(),
            updated_at: updated_at.to_jiff(),
        })
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn set_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: Role,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ROLE_SQL)
            .bind(user.into_uuid())
            .bind(role.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_USERS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role_text: String = row.try_get("role")?;

        let role = Role::from_str(&role_text).map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            phone: row.try_get("phone")?,
            role,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
