//! Welcome and health endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kin_persistence::core::CollectionStore;
use serde_json::json;

use crate::responses::success_response;
use crate::state::AppState;

/// Handles `GET /`.
pub async fn welcome_handler() -> Response {
    success_response(StatusCode::OK, "Welcome to the KIN API")
}

/// Handles `GET /health`.
pub async fn health_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "OK",
            "backend": state.storage().backend_name(),
        })),
    )
        .into_response()
}
