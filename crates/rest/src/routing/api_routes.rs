//! KIN API route configuration.
//!
//! All collection routes live under `/api/v1`; the welcome and health
//! endpoints live at the root.

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use kin_persistence::core::CollectionStore;

use crate::error::RestError;
use crate::handlers;
use crate::state::AppState;

/// Creates all KIN REST API routes.
///
/// ## System-level
/// - `GET /` - Welcome message
/// - `GET /health` - Health check
///
/// ## Collection-level (under `/api/v1`)
/// - `GET /{collection}` - List with filtering, search, sort, pagination
/// - `POST /{collection}` - Create
/// - `POST /{collection}/bulk-create` - Create many
/// - `DELETE /{collection}/bulk-delete` - Delete all
///
/// ## Record-level (under `/api/v1`)
/// - `GET /{collection}/{id}` - Read
/// - `PATCH /{collection}/{id}` - Update (merge)
/// - `DELETE /{collection}/{id}` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CollectionStore + 'static,
{
    let api = Router::new()
        // Collection-level routes
        .route("/{collection}", get(handlers::list_handler::<S>))
        .route("/{collection}", post(handlers::create_handler::<S>))
        .route(
            "/{collection}/bulk-create",
            post(handlers::bulk_create_handler::<S>),
        )
        .route(
            "/{collection}/bulk-delete",
            delete(handlers::bulk_delete_handler::<S>),
        )
        // Record-level routes
        .route("/{collection}/{id}", get(handlers::read_handler::<S>))
        .route("/{collection}/{id}", patch(handlers::update_handler::<S>))
        .route(
            "/{collection}/{id}",
            delete(handlers::delete_handler::<S>),
        );

    Router::new()
        // System-level routes
        .route("/", get(handlers::welcome_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .nest("/api/v1", api)
        .fallback(fallback_handler)
        .with_state(state)
}

/// Handles every request no route matched.
async fn fallback_handler() -> RestError {
    RestError::NotFound {
        message: "Couldn't find this route.".to_string(),
    }
}
