pub mod moka_cache;
pub mod redis_cache;

pub use moka_cache::MokaCache;
pub use redis_cache::RedisCache;

use shared::config::CacheBackend;
use std::sync::Arc;
use todos::ports::CacheStore;
use tracing::{info, warn};

/// Entry bound used when Redis is configured but unreachable at startup
const FALLBACK_MAX_ENTRIES: u64 = 10_000;

/// Build the cache store selected by configuration.
///
/// An unreachable Redis does not stop the process: the cache is a pure
/// optimisation, so the store falls back to an in-process Moka cache.
pub async fn build_store(backend: &CacheBackend) -> Arc<dyn CacheStore> {
    match backend {
        CacheBackend::Memory { max_entries } => {
            info!("Using in-memory cache (max {} entries)", max_entries);
            Arc::new(MokaCache::new("todos".to_string(), Some(*max_entries)))
        }
        CacheBackend::Redis { url } => match RedisCache::connect(url).await {
            Ok(cache) => {
                info!("Connected to Redis cache");
                Arc::new(cache)
            }
            Err(e) => {
                warn!(
                    "Failed to connect to Redis: {}. Running with in-memory cache.",
                    e
                );
                Arc::new(MokaCache::new(
                    "todos".to_string(),
                    Some(FALLBACK_MAX_ENTRIES),
                ))
            }
        },
    }
}
