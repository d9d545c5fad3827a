use async_trait::async_trait;
use bytes::Bytes;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use shared::{Error, Result};
use std::time::Duration;
use todos::domain::response::GetResponse;
use todos::ports::CacheStore;

/// Redis-backed cache store.
///
/// `ConnectionManager` multiplexes one connection and reconnects on failure,
/// so clones are cheap and share it.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(redis_error)?;
        let connection = ConnectionManager::new(client).await.map_err(redis_error)?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<GetResponse<Bytes>> {
        let mut connection = self.connection.clone();
        let value: Option<Vec<u8>> = connection.get(key).await.map_err(redis_error)?;

        match value {
            Some(value) if !value.is_empty() => Ok(GetResponse::new(true, Bytes::from(value))),
            _ => Err(Error::NotFound),
        }
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<()> {
        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(key, &value[..], ttl_seconds(ttl))
            .await
            .map_err(redis_error)
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

/// SETEX takes whole seconds and rejects 0, so round up and clamp to 1.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

fn redis_error(err: redis::RedisError) -> Error {
    Error::Internal(format!("redis: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_rounds_up_and_never_hits_zero() {
        assert_eq!(ttl_seconds(Duration::from_secs(300)), 300);
        assert_eq!(ttl_seconds(Duration::from_millis(1500)), 2);
        assert_eq!(ttl_seconds(Duration::from_millis(10)), 1);
        assert_eq!(ttl_seconds(Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisCache::connect("http://not-redis").await;
        assert!(matches!(result, Err(Error::Internal(msg)) if msg.starts_with("redis:")));
    }
}
