//! Key-value cache port
//!
//! The session core only needs a handful of string operations with TTLs.
//! [`RedisPool`] is the production implementation; tests plug in memory
//! stores.

use async_trait::async_trait;

use crate::pool::{CacheResult, RedisPool};

/// Key-value store with per-key expiry
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value; expired keys read as absent
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Write a value that expires after `ttl_seconds`, replacing any previous TTL
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Check whether a live value exists
    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// Increment an integer value, creating it at 1; the TTL is left untouched
    async fn increment(&self, key: &str) -> CacheResult<i64>;

    /// Remove a key, reporting whether it existed
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Probe reachability
    async fn ping(&self) -> CacheResult<()>;
}

#[async_trait]
impl CacheStore for RedisPool {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.get_string(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.set_string(key, value, ttl_seconds).await
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        RedisPool::exists(self, key).await
    }

    async fn increment(&self, key: &str) -> CacheResult<i64> {
        self.incr(key).await
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        RedisPool::delete(self, key).await
    }

    async fn ping(&self) -> CacheResult<()> {
        self.health_check().await
    }
}
