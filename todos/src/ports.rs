use crate::domain::Todo;
use crate::domain::response::GetResponse;
use crate::error::SourceError;
use async_trait::async_trait;
use bytes::Bytes;
use shared::Result;
use std::time::Duration;

// Ports are the pluggable extension points for the cache and the upstream

/// Port for raw key-value storage with expiry (e.g., Moka, Redis)
///
/// A missing or expired key is reported as `Error::NotFound`.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<GetResponse<Bytes>>;
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<()>;
}

/// Port for the read-only upstream todo collection
#[async_trait]
pub trait TodoSource: Send + Sync + 'static {
    async fn fetch_all(&self) -> std::result::Result<Vec<Todo>, SourceError>;
    async fn fetch_by_id(&self, id: &str) -> std::result::Result<Todo, SourceError>;
}
