use crate::cache_client::CacheClient;
use crate::domain::{DEFAULT_CACHE_TTL, TODOS_CACHE_KEY, Todo, TodoId};
use crate::error::{RetrievalError, SourceError};
use crate::ports::TodoSource;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Cache-aside retrieval of todos.
///
/// Every operation reads the cache once, and on a miss fetches from the
/// upstream once and writes the cache once. Cache failures only cost latency.
#[derive(Clone)]
pub struct TodoRetrievalService {
    cache: CacheClient,
    source: Arc<dyn TodoSource>,
    cache_ttl: Duration,
    upstream_timeout: Duration,
}

impl TodoRetrievalService {
    pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(cache: CacheClient, source: Arc<dyn TodoSource>) -> Self {
        Self {
            cache,
            source,
            cache_ttl: DEFAULT_CACHE_TTL,
            upstream_timeout: Self::DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// List the whole collection.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, RetrievalError> {
        if let Some(todos) = self.read_cached::<Vec<Todo>>(TODOS_CACHE_KEY).await {
            return Ok(todos);
        }

        let todos = self
            .fetch_upstream(self.source.fetch_all())
            .await
            .map_err(|e| match e {
                SourceError::NotFound => {
                    RetrievalError::UpstreamUnavailable("todo collection not found".to_string())
                }
                other => upstream_error(other),
            })
            .inspect_err(|e| error!("failed to list todos: {}", e))?;

        self.populate(TODOS_CACHE_KEY, &todos).await?;
        Ok(todos)
    }

    /// Fetch a single todo by its textual id.
    pub async fn get_todo(&self, raw_id: &str) -> Result<Todo, RetrievalError> {
        let id = TodoId::parse(raw_id)?;
        let key = id.cache_key();

        if let Some(todo) = self.read_cached::<Todo>(&key).await {
            return Ok(todo);
        }

        let todo = self
            .fetch_upstream(self.source.fetch_by_id(id.as_str()))
            .await
            .map_err(|e| match e {
                SourceError::NotFound => RetrievalError::TodoNotFound(id.to_string()),
                other => upstream_error(other),
            })
            .inspect_err(|e| error!("failed to get todo {}: {}", id, e))?;

        self.populate(&key, &todo).await?;
        Ok(todo)
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_slice(&raw) {
            Ok(value) => {
                debug!("cache hit for key '{}'", key);
                Some(value)
            }
            Err(e) => {
                warn!("failed to decode cached entry '{}', refetching: {}", key, e);
                None
            }
        }
    }

    async fn fetch_upstream<T, F>(&self, fetch: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        tokio::time::timeout(self.upstream_timeout, fetch)
            .await
            .unwrap_or_else(|_| {
                Err(SourceError::Transport(format!(
                    "timed out after {:?}",
                    self.upstream_timeout
                )))
            })
    }

    /// Serialize and store a freshly fetched value. Only encoding failures
    /// are returned; a failed write is logged and dropped.
    async fn populate<T: Serialize>(&self, key: &str, value: &T) -> Result<(), RetrievalError> {
        let payload = serde_json::to_vec(value)
            .inspect_err(|e| error!("failed to serialize '{}' for the cache: {}", key, e))?;

        match self
            .cache
            .set(key, Bytes::from(payload), self.cache_ttl)
            .await
        {
            Ok(()) => debug!("cached '{}' for {:?}", key, self.cache_ttl),
            Err(e) => warn!("failed to save '{}' in cache: {}", key, e),
        }

        Ok(())
    }
}

fn upstream_error(err: SourceError) -> RetrievalError {
    match err {
        SourceError::Decode(msg) => RetrievalError::UpstreamMalformedResponse(msg),
        other => RetrievalError::UpstreamUnavailable(other.to_string()),
    }
}

impl std::fmt::Debug for TodoRetrievalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoRetrievalService")
            .field("cache", &self.cache)
            .field("cache_ttl", &self.cache_ttl)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}
