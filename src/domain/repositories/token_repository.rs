//! Repository trait for API tokens.

use async_trait::async_trait;

use crate::domain::entities::ApiToken;
use crate::error::AppError;

/// Storage of API tokens by keyed digest.
///
/// Implemented by [`crate::infrastructure::persistence::PgTokenRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Marks an active token as used and returns it.
    ///
    /// Returns `Ok(None)` if no token has this digest or it is revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or digest already exists.
    async fn create(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError>;

    /// All tokens, newest first.
    async fn list(&self) -> Result<Vec<ApiToken>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token that is still active.
    ///
    /// Returns `Ok(false)` if the token does not exist or was already revoked.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;
}
