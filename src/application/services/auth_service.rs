//! Bearer token authentication.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::ApiToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Keyed digest of a raw token, as stored in `api_tokens.token_hash`.
///
/// The admin CLI and the server must be configured with the same secret.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Resolves a raw bearer token to an active [`ApiToken`], stamping its
    /// `last_used_at` in the same statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    pub async fn authenticate(&self, token: &str) -> Result<ApiToken, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        match self.repository.touch_active(&token_hash).await? {
            Some(api_token) => {
                metrics::counter!("auth_success_total").increment(1);
                Ok(api_token)
            }
            None => {
                metrics::counter!("auth_rejected_total").increment(1);
                Err(AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or revoked token"}),
                ))
            }
        }
    }
}
