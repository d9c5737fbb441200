//! Error types for the KIN REST API.
//!
//! All errors are returned in the API's error envelope:
//!
//! ```json
//! { "success": false, "error": { "status": 404, "message": "..." } }
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | BadRequest | 400 |
//! | NotFound / UnknownCollection | 404 |
//! | NotAcceptable | 406 |
//! | Conflict | 409 |
//! | Internal | 500 |

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kin_persistence::error::{QueryError, StoreError};

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Bad request - invalid query or body (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Resource not found (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// The requested collection is not part of the API (HTTP 404).
    UnknownCollection {
        /// The collection name from the request path.
        name: String,
    },

    /// Request conflicts with existing data but may be retried with
    /// different content (HTTP 406).
    NotAcceptable {
        /// Error message.
        message: String,
    },

    /// Duplicate data conflict (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    Internal {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } | RestError::UnknownCollection { .. } => {
                StatusCode::NOT_FOUND
            }
            RestError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::NotFound { message } => write!(f, "{}", message),
            RestError::UnknownCollection { name } => {
                write!(f, "Unknown collection: {}", name)
            }
            RestError::NotAcceptable { message } => write!(f, "{}", message),
            RestError::Conflict { message } => write!(f, "{}", message),
            RestError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            RestError::BadRequest { message }
            | RestError::NotFound { message }
            | RestError::NotAcceptable { message }
            | RestError::Conflict { message }
            | RestError::Internal { message } => message.clone(),
            RestError::UnknownCollection { name } => {
                format!("Couldn't find the collection '{}'.", name)
            }
        };

        let body = error_envelope(status, &message);
        (status, Json(body)).into_response()
    }
}

/// Builds the API's error envelope.
pub fn error_envelope(status: StatusCode, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": {
            "status": status.as_u16(),
            "message": message,
        }
    })
}

impl From<QueryError> for RestError {
    fn from(err: QueryError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => RestError::NotFound {
                message: format!("Couldn't find {}/{}.", collection, id),
            },
            StoreError::Duplicate { collection, id } => RestError::Conflict {
                message: format!("Record {}/{} already exists.", collection, id),
            },
            StoreError::InvalidRecord { message } => RestError::BadRequest { message },
            StoreError::Backend { message } => RestError::Internal { message },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::UnknownCollection {
                name: "things".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = error_envelope(StatusCode::NOT_FOUND, "Couldn't find any user data!");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["status"], 404);
        assert_eq!(body["error"]["message"], "Couldn't find any user data!");
    }

    #[test]
    fn test_query_error_maps_to_bad_request() {
        let err: RestError = QueryError::SearchNotSupported.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: RestError = StoreError::NotFound {
            collection: "users".to_string(),
            id: "1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
