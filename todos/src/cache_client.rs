use crate::ports::CacheStore;
use bytes::Bytes;
use shared::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Thin wrapper over a `CacheStore` that bounds every round-trip and folds
/// store failures into plain misses.
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
    timeout: Duration,
}

impl CacheClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns `None` for absent keys and for any store failure alike.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        match timeout(self.timeout, self.store.get(key)).await {
            Ok(Ok(response)) if response.found => Some(response.message),
            Ok(Ok(_)) | Ok(Err(Error::NotFound)) => {
                debug!("no data in cache for key '{}'", key);
                None
            }
            Ok(Err(e)) => {
                warn!("cache read failed for key '{}': {}", key, e);
                None
            }
            Err(_) => {
                warn!("cache read timed out for key '{}' after {:?}", key, self.timeout);
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<()> {
        timeout(self.timeout, self.store.set(key, value, ttl))
            .await
            .unwrap_or(Err(Error::Timeout(self.timeout)))
    }
}

impl std::fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("timeout", &self.timeout)
            .finish()
    }
}
