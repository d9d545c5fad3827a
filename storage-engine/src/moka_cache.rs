use async_trait::async_trait;
use bytes::Bytes;
use moka::Expiry;
use moka::future::Cache;
use shared::{Error, Result};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use todos::domain::response::GetResponse;
use todos::ports::CacheStore;

#[derive(Clone, Debug)]
struct Entry {
    value: Bytes,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with. An overwrite
/// restarts the clock.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based cache implementation with per-entry TTL
/// Provides lock-free, concurrent cache with optional size bounds
pub struct MokaCache {
    cache: Cache<String, Entry>,
}

impl MokaCache {
    /// Create a Moka cache from name and optional capacity
    pub fn new(name: String, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(&name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }

    /// Create a new unbounded Moka cache
    pub fn new_unbounded() -> Self {
        Self {
            cache: Cache::builder().expire_after(PerEntryTtl).build(),
        }
    }
}

#[async_trait]
impl CacheStore for MokaCache {
    async fn get(&self, key: &str) -> Result<GetResponse<Bytes>> {
        match self.cache.get(key).await {
            Some(entry) => Ok(GetResponse::new(true, entry.value)),
            None => Err(Error::NotFound), // Either doesn't exist or TTL expired
        }
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<()> {
        self.cache
            .insert(key.to_string(), Entry { value, ttl })
            .await;
        Ok(())
    }
}

impl Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
