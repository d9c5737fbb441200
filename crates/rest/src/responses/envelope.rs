//! Success response envelopes.
//!
//! Every successful response uses the same wire shape:
//!
//! ```json
//! { "success": true, "message": "...", "pagination": { ... }, "data": ... }
//! ```
//!
//! `pagination` and `data` are only present where they apply.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kin_persistence::types::Pagination;
use serde_json::{Value, json};

/// A message-only success response.
pub fn success_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "message": message,
        })),
    )
        .into_response()
}

/// A success response carrying a single record or document.
pub fn data_response(status: StatusCode, message: &str, data: Value) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": data,
        })),
    )
        .into_response()
}

/// A success response carrying a page of records plus pagination metadata.
pub fn list_response(message: &str, pagination: &Pagination, data: Vec<Value>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": message,
            "pagination": pagination,
            "data": data,
        })),
    )
        .into_response()
}
