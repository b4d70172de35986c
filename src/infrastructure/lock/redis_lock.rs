//! Redis-backed lock implementation.

use super::service::{GenerationLock, LockError, LockResult, LockToken, random_token_value};
use crate::config::mask_connection_string;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Deletes the key only if it still holds our value.
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Lock shared by every instance connected to the same Redis.
///
/// Acquisition is `SET key value NX EX ttl`; release is a compare-and-delete
/// script so an expired holder cannot free someone else's lock.
pub struct RedisLock {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisLock {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> LockResult<Self> {
        info!(url = %mask_connection_string(redis_url), "Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            LockError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            LockError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| LockError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: "lock:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl GenerationLock for RedisLock {
    async fn try_acquire(&self, key: &str) -> LockResult<Option<LockToken>> {
        let redis_key = self.build_key(key);
        let value = random_token_value();
        let mut conn = self.client.clone();

        let reply: Option<String> = redis::cmd("SET")
            .arg(&redis_key)
            .arg(&value)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| LockError::OperationError(format!("SET NX failed: {}", e)))?;

        match reply {
            Some(_) => {
                debug!("Lock ACQUIRED: {}", redis_key);
                Ok(Some(LockToken {
                    key: key.to_string(),
                    value,
                }))
            }
            None => {
                debug!("Lock BUSY: {}", redis_key);
                Ok(None)
            }
        }
    }

    async fn release(&self, token: &LockToken) -> LockResult<()> {
        let redis_key = self.build_key(&token.key);
        let mut conn = self.client.clone();

        let script = Script::new(RELEASE_SCRIPT);
        let deleted: i32 = script
            .key(&redis_key)
            .arg(&token.value)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| LockError::OperationError(format!("Lock release failed: {}", e)))?;

        if deleted == 0 {
            warn!("Lock {} expired before release", redis_key);
        } else {
            debug!("Lock RELEASED: {}", redis_key);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
