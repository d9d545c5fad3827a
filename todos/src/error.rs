use thiserror::Error;

/// Failures reported by an upstream todo source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("resource not found")]
    NotFound,

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Request-level failures of the retrieval service.
///
/// Cache failures never show up here; they degrade to an upstream fetch.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid id: '{0}'")]
    InvalidId(String),

    #[error("todo {0} not found")]
    TodoNotFound(String),

    #[error("failed to load the data from external API: {0}")]
    UpstreamUnavailable(String),

    #[error("failed to parse external API's response: {0}")]
    UpstreamMalformedResponse(String),

    #[error("failed to serialize data for the cache: {0}")]
    SerializationFailure(String),
}

impl RetrievalError {
    /// Stable name of the error kind, used in error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            RetrievalError::InvalidId(_) => "InvalidId",
            RetrievalError::TodoNotFound(_) => "TodoNotFound",
            RetrievalError::UpstreamUnavailable(_) => "UpstreamUnavailable",
            RetrievalError::UpstreamMalformedResponse(_) => "UpstreamMalformedResponse",
            RetrievalError::SerializationFailure(_) => "SerializationFailure",
        }
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        RetrievalError::SerializationFailure(err.to_string())
    }
}
