//! Generation lock trait and error types.

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Errors raised by lock backends.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("Lock backend connection error: {0}")]
    ConnectionError(String),
    #[error("Lock operation error: {0}")]
    OperationError(String),
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

/// Proof of ownership returned by [`GenerationLock::try_acquire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken {
    pub key: String,
    pub value: String,
}

/// Short-lived mutual exclusion keyed by string.
///
/// Used to keep two transport generations for the same event from running at
/// once. Locks expire on their own after the backend's TTL so a crashed holder
/// cannot block an event forever.
///
/// # Implementations
///
/// - [`crate::infrastructure::lock::RedisLock`] - shared across service instances
/// - [`crate::infrastructure::lock::LocalLock`] - single process only
#[async_trait]
pub trait GenerationLock: Send + Sync {
    /// Attempts to take the lock without waiting.
    ///
    /// Returns `Ok(None)` if someone else holds it.
    async fn try_acquire(&self, key: &str) -> LockResult<Option<LockToken>>;

    /// Releases a lock previously acquired with `token`.
    ///
    /// A lock that expired and was taken by another holder is left alone.
    async fn release(&self, token: &LockToken) -> LockResult<()>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health output.
    fn backend(&self) -> &'static str;
}

/// Random value identifying one lock holder.
pub(crate) fn random_token_value() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}
