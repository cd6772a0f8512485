//! Server configuration from environment variables.

use std::env;

use http::HeaderValue;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Password required for the admin page.
    pub admin_password: String,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ADMIN_PASSWORD`: Password for the `admin` user (must be non-empty)
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 8080)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))?;

        let port = match env::var("PORT") {
            Ok(s) => s.parse().map_err(|e| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: format!("{e}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        Ok(Self {
            admin_password,
            port,
            log_level,
            cors_allowed_origins,
        })
    }

    /// Create a configuration with defaults and the given admin password.
    pub fn with_admin_password(admin_password: impl Into<String>) -> Self {
        Self {
            admin_password: admin_password.into(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
        }
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Parse the configured CORS origins.
    ///
    /// Returns `None` when every origin is allowed.
    pub fn cors_origins(&self) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
        if self.cors_allowed_origins.trim() == "*" {
            return Ok(None);
        }

        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse().map_err(|_| ConfigError::InvalidValue {
                    name: "CORS_ALLOWED_ORIGINS".to_string(),
                    reason: format!("invalid origin '{origin}'"),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("admin_password", &"<redacted>")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
