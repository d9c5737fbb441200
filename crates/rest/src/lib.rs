//! # kin-rest - KIN Membership REST API
//!
//! This crate implements the HTTP surface of the KIN membership platform:
//! a uniform JSON API over named collections (users, subscribers, advisors,
//! programs, posts, sliders, executive committee members, org members)
//! with filtering,
//! free-text search, sorting, field projection, and pagination driven
//! entirely by the query string.
//!
//! ## Query String Conventions
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `search=<term>` | Case-insensitive substring match over the collection's searchable fields |
//! | `<field>=<value>` | Equality constraint on `<field>` |
//! | `<field>[op]=<n>` | Numeric constraint; `op` is one of `eq,ne,gt,gte,lt,lte,in` |
//! | `sort=a,-b` | Sort by `a` ascending then `b` descending |
//! | `fields=a,b` | Return only the listed fields |
//! | `page`, `limit` | 1-based pagination, defaults 1 and 10 |
//!
//! Unknown bracket operators and non-numeric operator values are rejected
//! with a 400 rather than silently ignored.
//!
//! ## Response Envelopes
//!
//! Success: `{ "success": true, "message": "...", "pagination": {...}, "data": ... }`
//!
//! Error: `{ "success": false, "error": { "status": 400, "message": "..." } }`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kin_persistence::backends::MemoryStore;
//! use kin_rest::{ServerConfig, create_app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new();
//!     let app = create_app(store);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The server is configured via environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KIN_SERVER_PORT` | 8000 | Server port |
//! | `KIN_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `KIN_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `KIN_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `KIN_ENABLE_CORS` | true | Enable CORS |
//! | `KIN_CORS_ORIGINS` | * | Allowed CORS origins |
//! | `KIN_MAX_PAGE_SIZE` | 100 | Hard cap on the `limit` parameter |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the error envelope
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`registry`] - The collections served by the API
//! - [`extractors`] - Raw query parsing and query translation
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - Success envelopes
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod registry;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use kin_persistence::core::CollectionStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default
/// settings. For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: CollectionStore + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up the complete KIN REST API with all handlers, middleware, and
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use kin_persistence::backends::MemoryStore;
/// use kin_rest::{ServerConfig, create_app_with_config};
///
/// let store = MemoryStore::new();
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(store, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: CollectionStore + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), config.clone());

    // Build the router with all API routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kin_rest={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
