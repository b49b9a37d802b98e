//! Redis integration service implementation
//!
//! This service handles the Redis connection, session persistence for
//! sign-in tokens, password-reset token storage, and cache invalidation.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RedisConfig;
use crate::utils::errors::Result;

/// Redis service for caching and session state
#[derive(Clone)]
pub struct RedisService {
    manager: ConnectionManager,
    config: RedisConfig,
}

impl RedisService {
    /// Create a new RedisService instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let manager = ConnectionManager::new(client).await?;

        Ok(Self { manager, config })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let serialized = serde_json::to_string(value)?;
        let full_key = self.full_key(key);
        let ttl = ttl_seconds.unwrap_or(self.config.ttl_seconds);

        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(&full_key, serialized, ttl).await?;

        debug!(key = %full_key, ttl = ttl, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let full_key = self.full_key(key);

        let mut conn = self.manager.clone();
        let result: Option<String> = conn.get(&full_key).await?;

        match result {
            Some(data) => {
                let deserialized = serde_json::from_str::<T>(&data)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let full_key = self.full_key(key);

        let mut conn = self.manager.clone();
        let deleted: i32 = conn.del(&full_key).await?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Check if a key exists in Redis
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let full_key = self.full_key(key);

        let mut conn = self.manager.clone();
        let exists: bool = conn.exists(&full_key).await?;

        debug!(key = %full_key, exists = exists, "Key existence check");
        Ok(exists)
    }

    /// Check Redis connectivity
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.manager.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(pong == "PONG")
    }
}
