//! HTTP client for the upstream todo collection
//!
//! Talks to a read-only JSON API shaped like jsonplaceholder:
//! `GET {base}/todos` and `GET {base}/todos/{id}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{Error, Result};
use std::time::Duration;
use todos::domain::Todo;
use todos::error::SourceError;
use todos::ports::TodoSource;
use tracing::debug;

/// `TodoSource` backed by a remote HTTP JSON API
#[derive(Debug, Clone)]
pub struct HttpTodoSource {
    client: Client,
    base_url: String,
}

impl HttpTodoSource {
    /// Create a source with a client whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a source around an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, SourceError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(SourceError::NotFound),
            status if !status.is_success() => {
                return Err(SourceError::Transport(format!(
                    "upstream responded with {}",
                    status
                )));
            }
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TodoSource for HttpTodoSource {
    async fn fetch_all(&self) -> std::result::Result<Vec<Todo>, SourceError> {
        self.fetch_json(&format!("{}/todos", self.base_url)).await
    }

    async fn fetch_by_id(&self, id: &str) -> std::result::Result<Todo, SourceError> {
        self.fetch_json(&format!("{}/todos/{}", self.base_url, id))
            .await
    }
}
