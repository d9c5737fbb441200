//! Server configuration for the KIN REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KIN_SERVER_PORT` | 8000 | Server port |
//! | `KIN_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `KIN_LOG_LEVEL` | info | Log level |
//! | `KIN_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `KIN_ENABLE_CORS` | true | Enable CORS |
//! | `KIN_CORS_ORIGINS` | * | Allowed origins |
//! | `KIN_BASE_URL` | http://localhost:8000 | Server base URL |
//! | `KIN_DEFAULT_PAGE_SIZE` | 10 | Default list page size |
//! | `KIN_MAX_PAGE_SIZE` | 100 | Maximum list page size |

use clap::Parser;

/// Server configuration for the KIN REST API.
///
/// Can be constructed from environment variables using
/// [`ServerConfig::from_env`], from command line arguments using
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "kin-server")]
#[command(about = "KIN membership platform API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "KIN_SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "KIN_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "KIN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "KIN_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "KIN_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "KIN_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "KIN_CORS_METHODS",
        default_value = "GET,POST,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "KIN_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in log output and links).
    #[arg(long, env = "KIN_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Default page size for list results.
    #[arg(long, env = "KIN_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: u64,

    /// Maximum page size for list results.
    #[arg(long, env = "KIN_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8000".to_string(),
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables
    /// without requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:0".to_string(),
            default_page_size: 10,
            max_page_size: 50,
        }
    }
}
