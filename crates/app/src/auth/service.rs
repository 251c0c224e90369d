//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedUserToken, generate_user_token, hash_user_token,
        is_well_formed_user_token, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new bearer token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_user_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedUserToken, AuthServiceError> {
        let token = generate_user_token();

        let metadata = self
            .repository
            .create_user_token(Uuid::now_v7(), user, &hash_user_token(&token))
            .await?;

        Ok(IssuedUserToken { token, metadata })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_user_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_user_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        if !is_well_formed_user_token(bearer_token) {
            return Err(AuthServiceError::Malformed);
        }

        let user = self
            .repository
            .find_user_by_token_hash(&hash_user_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        debug!(user_uuid = %user, "bearer token accepted");

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
