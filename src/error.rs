//! Error types for the store and its HTTP front end
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
///
/// Missing keys are not errors for the store itself; `NotFound` and `Expired`
/// are only raised by the HTTP layer, which has to turn an absent value into a
/// response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key is present but its TTL has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bulk write called with key and value lists of different lengths
    #[error("Batch length mismatch: {keys} keys, {values} values")]
    BatchLengthMismatch { keys: usize, values: usize },
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) | CacheError::Expired(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::BatchLengthMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            CacheError::NotFound("k".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CacheError::Expired("k".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CacheError::BatchLengthMismatch { keys: 2, values: 1 }
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_batch_mismatch_message() {
        let err = CacheError::BatchLengthMismatch { keys: 3, values: 2 };
        assert_eq!(err.to_string(), "Batch length mismatch: 3 keys, 2 values");
    }
}
