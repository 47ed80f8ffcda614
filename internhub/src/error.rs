//! API error taxonomy
//!
//! Every variant maps to a response status. An unreachable scoring service
//! is deliberately NOT represented here: that failure is recovered locally
//! by the fallback ranker and never surfaces to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use internhub_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Errors reported to API callers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or unusable credential
    #[error("{0}")]
    Unauthenticated(String),

    /// Credential present but invalid
    #[error("Invalid token")]
    Forbidden,

    /// Profile or internship absent
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed fields on a mutating operation
    #[error("{0}")]
    Validation(String),

    /// Duplicate registration
    #[error("{0}")]
    Conflict(String),

    /// The scoring service was reachable but returned a malformed response.
    /// Reported, not masked: a broken upstream is a different failure mode
    /// than an unreachable one.
    #[error("Invalid response from recommendation service: {0}")]
    BadUpstream(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadUpstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::InvalidPattern(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthenticated("Token required".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("User not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadUpstream("missing recommendations".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::NotFound("user 1".into()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StoreError::QueryError("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));

        let err: ApiError = StoreError::InvalidPattern("(".into()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
