//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_URL` - Base URL of the shop backend REST API
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_PRODUCT_CACHE_TTL_SECS` - Product detail cache TTL (default: 300)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Shop backend configuration
    pub backend: BackendConfig,
    /// Emit JSON log lines instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Shop backend REST API configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL without trailing slash (e.g., `https://api.example.com`)
    pub api_url: String,
    /// How long product detail responses stay cached
    pub product_cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_url("STOREFRONT_BASE_URL")?;
        let backend = BackendConfig::from_env()?;
        let json_logs = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            json_logs,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BackendConfig {
    /// Load only the backend settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STOREFRONT_API_URL` is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs = get_env_or_default("STOREFRONT_PRODUCT_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "STOREFRONT_PRODUCT_CACHE_TTL_SECS".to_string(),
                    e.to_string(),
                )
            })?;

        Ok(Self {
            api_url: get_url("STOREFRONT_API_URL")?,
            product_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required absolute http(s) URL, normalized without a trailing slash.
fn get_url(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    normalize_url(&value).map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

fn normalize_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            backend: BackendConfig {
                api_url: "http://127.0.0.1:5000".to_string(),
                product_cache_ttl: Duration::from_secs(300),
            },
            json_logs: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = test_config();
        assert!(!config.is_secure());
        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_normalize_url_strips_trailing_slash() {
        assert_eq!(
            normalize_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            normalize_url("https://api.example.com/v1/").unwrap(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_normalize_url_rejects_bad_input() {
        assert!(normalize_url("not a url").is_err());
        assert!(normalize_url("ftp://files.example.com").is_err());
    }
}
