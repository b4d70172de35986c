//! In-process lock implementation.

use super::service::{GenerationLock, LockResult, LockToken, random_token_value};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lock table kept in process memory.
///
/// Correct only when a single service instance talks to the database. Used
/// when Redis is not configured or unreachable, and in tests.
pub struct LocalLock {
    ttl: Duration,
    held: Mutex<HashMap<String, (String, Instant)>>,
}

impl LocalLock {
    pub fn new(ttl: Duration) -> Self {
        debug!("Using in-process generation lock");
        Self {
            ttl,
            held: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for LocalLock {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

#[async_trait]
impl GenerationLock for LocalLock {
    async fn try_acquire(&self, key: &str) -> LockResult<Option<LockToken>> {
        let now = Instant::now();
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());

        if let Some((_, expires_at)) = held.get(key)
            && *expires_at > now
        {
            return Ok(None);
        }

        let value = random_token_value();
        held.insert(key.to_string(), (value.clone(), now + self.ttl));

        Ok(Some(LockToken {
            key: key.to_string(),
            value,
        }))
    }

    async fn release(&self, token: &LockToken) -> LockResult<()> {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());

        if held.get(&token.key).is_some_and(|(v, _)| *v == token.value) {
            held.remove(&token.key);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_acquire_is_refused() {
        let lock = LocalLock::default();

        let first = lock.try_acquire("event:1").await.unwrap();
        assert!(first.is_some());

        let second = lock.try_acquire("event:1").await.unwrap();
        assert!(second.is_none());

        let other_event = lock.try_acquire("event:2").await.unwrap();
        assert!(other_event.is_some());
    }

    #[tokio::test]
    async fn test_release_allows_reacquire() {
        let lock = LocalLock::default();

        let token = lock.try_acquire("event:1").await.unwrap().unwrap();
        lock.release(&token).await.unwrap();

        assert!(lock.try_acquire("event:1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stale_token_does_not_release_new_holder() {
        let lock = LocalLock::new(Duration::ZERO);

        let stale = lock.try_acquire("event:1").await.unwrap().unwrap();
        // TTL of zero: the lock is already expired and can be taken again.
        let current = lock.try_acquire("event:1").await.unwrap().unwrap();
        assert_ne!(stale.value, current.value);

        lock.release(&stale).await.unwrap();

        let held = lock.held.lock().unwrap();
        assert_eq!(held.get("event:1").map(|(v, _)| v.clone()), Some(current.value));
    }
}
