//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{auth::models::UserTokenMetadata, domain::users::records::UserUuid};

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const CREATE_USER_TOKEN_SQL: &str = include_str!("sql/create_user_token.sql");
const REVOKE_USER_TOKEN_SQL: &str = include_str!("sql/revoke_user_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map(|uuid| uuid.map(UserUuid::from_uuid))
    }

    pub(crate) async fn create_user_token(
        &self,
        uuid: Uuid,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<UserTokenMetadata, sqlx::Error> {
        query_as::<Postgres, UserTokenMetadata>(CREATE_USER_TOKEN_SQL)
            .bind(uuid)
            .bind(user.into_uuid())
            .bind(token_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn revoke_user_token(
        &self,
        uuid: Uuid,
    ) -> Result<Option<UserTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, UserTokenMetadata>(REVOKE_USER_TOKEN_SQL)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
