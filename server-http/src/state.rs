use shared::config::Config;
use std::sync::Arc;
use todos::{CacheClient, TodoRetrievalService};
use upstream::HttpTodoSource;

/// Server state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub todos: TodoRetrievalService,
}

impl AppState {
    pub fn new(todos: TodoRetrievalService) -> Self {
        Self { todos }
    }

    /// Wire the cache store and upstream client selected by configuration.
    pub async fn from_config(config: &Config) -> shared::Result<Self> {
        let store = storage_engine::build_store(&config.cache).await;
        let cache = CacheClient::new(store).with_timeout(config.cache_timeout);

        let source = HttpTodoSource::new(config.upstream_url.clone(), config.upstream_timeout)?;
        tracing::info!("Upstream todo source: {}", source.base_url());

        let todos = TodoRetrievalService::new(cache, Arc::new(source))
            .with_cache_ttl(config.cache_ttl)
            .with_upstream_timeout(config.upstream_timeout);

        Ok(Self::new(todos))
    }
}
