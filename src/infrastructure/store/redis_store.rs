//! Redis-backed store for redirections that must survive restarts.

use crate::domain::store::{RedirectionStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Durable redirection table kept in Redis.
///
/// Each short key is a plain string key under `key_prefix`. `SET` and `GET`
/// are atomic per command, so concurrent puts on distinct keys never
/// interfere. Entries have no TTL.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> StoreResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.into(),
        })
    }

    fn build_key(&self, short_key: &str) -> String {
        format!("{}{}", self.key_prefix, short_key)
    }
}

#[async_trait]
impl RedirectionStore for RedisStore {
    async fn put(&self, short_key: &str, resource: &str) -> StoreResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(&key, resource).await.map_err(|e| {
            error!("Redis SET error for {}: {}", short_key, e);
            StoreError::Operation(e.to_string())
        })?;

        debug!("Redis SET: {} -> {}", short_key, resource);
        Ok(())
    }

    async fn get(&self, short_key: &str) -> StoreResult<Option<String>> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", short_key, e);
            StoreError::Operation(e.to_string())
        })
    }
}
