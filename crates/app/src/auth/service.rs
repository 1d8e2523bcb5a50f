//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};
use tradein::roles::Actor;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, format_api_token,
        generate_api_token_secret, models::NewApiToken, parse_api_token,
        repository::PgAuthRepository, token_verifier, verifiers_match,
    },
    domain::profiles::models::ProfileUuid,
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

    /// Issue a new API token for the given profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or the insert fails.
    pub async fn issue_api_token(
        &self,
        profile: ProfileUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                profile_uuid: profile,
                version,
                token_hash: token_verifier(&token_uuid, version, &profile, &secret),
                expires_at,
            })
            .await?;

        info!(token = %token_uuid, %profile, "api token issued");

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        profile: ProfileUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens_by_profile(profile).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token_uuid).await?.is_some();

        if revoked {
            info!(token = %token_uuid, "api token revoked");
        }

        Ok(revoked)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_malformed| AuthServiceError::InvalidToken)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        let verifier = token_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.profile_uuid,
            &parsed_token.secret,
        );

        if !verifiers_match(&token.token_hash, &verifier) {
            warn!(token = %parsed_token.token_uuid, "api token verifier mismatch");

            return Err(AuthServiceError::InvalidToken);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await;

        Ok(Actor::new(token.profile_uuid.into_uuid(), token.role))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the acting profile and its current role.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tradein::roles::Role;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn malformed_tokens_are_rejected_before_storage() -> TestResult {
        let pool = PgPool::connect_lazy("postgres://offline@localhost:1/none")?;
        let service = PgAuthService::new(pool);

        let result = service.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn issued_token_authenticates_as_its_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = ctx.create_profile("admin@example.com", Role::Admin).await?;

        let issued = ctx.auth.issue_api_token(admin.uuid, None).await?;
        let actor = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(actor, admin.actor());
        assert_eq!(issued.metadata.profile_uuid, admin.uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn revoked_token_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_profile("user@example.com", Role::User).await?;
        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn expired_token_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_profile("user@example.com", Role::User).await?;
        let past = Timestamp::now().checked_sub(jiff::SignedDuration::from_hours(1))?;

        let issued = ctx.auth.issue_api_token(user.uuid, Some(past)).await?;
        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn tampered_secret_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_profile("user@example.com", Role::User).await?;
        let issued = ctx.auth.issue_api_token(user.uuid, None).await?;

        let (id, secret) = issued.token.split_once('.').ok_or("token has a secret")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{}", secret.get(1..).unwrap_or_default());

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for the PostgreSQL test container"]
    async fn tokens_are_listed_per_profile() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_profile("user@example.com", Role::User).await?;
        let other = ctx.create_profile("other@example.com", Role::User).await?;

        ctx.auth.issue_api_token(user.uuid, None).await?;
        ctx.auth.issue_api_token(user.uuid, None).await?;
        ctx.auth.issue_api_token(other.uuid, None).await?;

        assert_eq!(ctx.auth.list_api_tokens(user.uuid).await?.len(), 2);

        Ok(())
    }
}
