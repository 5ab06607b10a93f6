//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
        compute_verifier, format_api_token, generate_api_token_secret, models::Actor,
        parse_api_token, repository::PgAuthRepository, verifier_matches,
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

    /// Issue a new API token for the given user. The raw token is
    /// returned once and never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash = compute_verifier(&token_uuid, version, &user_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await
            .map_err(AuthServiceError::from)?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_for_user(user_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_invalid| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await
            .map_err(AuthServiceError::from)?
            .ok_or(AuthServiceError::NotFound)?;

        // The stored row is the authority on the hash version; the parsed
        // version only selected the row.
        let computed = compute_verifier(
            &parsed_token.token_uuid,
            token.version,
            &token.user_uuid,
            &parsed_token.secret,
        );

        if !verifier_matches(&computed, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await;

        Ok(Actor::new(token.user_uuid, token.role))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::records::Role,
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_to_its_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let issued = ctx.auth.issue_api_token(member.user, None).await?;
        let actor = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(actor.user, member.user);
        assert_eq!(actor.role, Role::Member);

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_stops_authenticating() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let issued = ctx.auth.issue_api_token(member.user, None).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        // A second revoke finds nothing active.
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_stops_authenticating() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let past = Timestamp::now() - jiff::Span::new().hours(1);
        let issued = ctx.auth.issue_api_token(member.user, Some(past)).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let issued = ctx.auth.issue_api_token(member.user, None).await?;

        let mut tampered = issued.token.clone();
        let last = tampered.pop().map(|c| if c == '0' { '1' } else { '0' });
        tampered.extend(last);

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn forged_version_segment_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let issued = ctx.auth.issue_api_token(member.user, None).await?;
        let forged = issued.token.replacen("_v1_", "_v9_", 1);

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn list_api_tokens_shows_revocation_state() -> TestResult {
        let ctx = TestContext::new().await;
        let member = ctx.create_user(Role::Member).await;

        let keep = ctx.auth.issue_api_token(member.user, None).await?;
        let drop = ctx.auth.issue_api_token(member.user, None).await?;

        ctx.auth.revoke_api_token(drop.metadata.uuid).await?;

        let tokens = ctx.auth.list_api_tokens(member.user).await?;

        assert_eq!(tokens.len(), 2);

        for token in tokens {
            if token.uuid == keep.metadata.uuid {
                assert!(token.revoked_at.is_none());
            } else {
                assert!(token.revoked_at.is_some());
            }
        }

        Ok(())
    }
}
