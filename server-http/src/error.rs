use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use todos::RetrievalError;

/// Handler error carrying a retrieval failure to the HTTP layer
#[derive(Debug)]
pub struct ApiError(pub RetrievalError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            RetrievalError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RetrievalError::TodoNotFound(_) => StatusCode::NOT_FOUND,
            RetrievalError::UpstreamMalformedResponse(_) => StatusCode::BAD_GATEWAY,
            RetrievalError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RetrievalError::SerializationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.0.to_string(), self.0.kind());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_kind_has_distinct_status() {
        let errors = [
            RetrievalError::InvalidId("x".into()),
            RetrievalError::TodoNotFound("1".into()),
            RetrievalError::UpstreamMalformedResponse("eof".into()),
            RetrievalError::UpstreamUnavailable("refused".into()),
            RetrievalError::SerializationFailure("bad".into()),
        ];

        let mut statuses: Vec<u16> = errors
            .into_iter()
            .map(|e| ApiError(e).status().as_u16())
            .collect();
        assert_eq!(statuses, vec![400, 404, 502, 503, 500]);

        statuses.sort_unstable();
        statuses.dedup();
        assert_eq!(statuses.len(), 5);
    }
}
