//! Webapp configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_API_URL` - Base URL of the remote catalog/cart/favorites service
//!
//! ## Optional
//! - `WEBAPP_HOST` - Bind address (default: 127.0.0.1)
//! - `WEBAPP_PORT` - Listen port (default: 8080)
//! - `FALLBACK_SHOPPER_ID` - Shopper identifier used when the chat platform
//!   supplies none (default: 123456). Anonymous sessions sharing this
//!   identifier will see each other's cart; hardening it is out of scope.
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

use sauda_core::ShopperId;

/// Default shopper identifier when the platform context is unavailable.
const DEFAULT_FALLBACK_SHOPPER: i64 = 123_456;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Webapp application configuration.
#[derive(Debug, Clone)]
pub struct WebAppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote store API configuration
    pub store: StoreApiConfig,
    /// Shopper identifier used when the platform supplies none
    pub fallback_shopper: ShopperId,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Remote store API configuration.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    /// Base URL of the store service (e.g., <http://localhost:8000>)
    pub base_url: Url,
}

impl WebAppConfig {
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

        let host = get_env_or_default("WEBAPP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WEBAPP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("WEBAPP_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WEBAPP_PORT".to_string(), e.to_string()))?;

        let store = StoreApiConfig::from_env()?;

        let fallback_shopper = match get_optional_env("FALLBACK_SHOPPER_ID") {
            Some(raw) => raw.parse::<i64>().map(ShopperId::new).map_err(|e| {
                ConfigError::InvalidEnvVar("FALLBACK_SHOPPER_ID".to_string(), e.to_string())
            })?,
            None => ShopperId::new(DEFAULT_FALLBACK_SHOPPER),
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            store,
            fallback_shopper,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("STORE_API_URL")?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_API_URL".to_string(), e.to_string()))?;
        Ok(Self { base_url })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> WebAppConfig {
        WebAppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            store: StoreApiConfig {
                base_url: Url::parse("http://localhost:8000").unwrap(),
            },
            fallback_shopper: ShopperId::new(DEFAULT_FALLBACK_SHOPPER),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_default_fallback_shopper_matches_platform_shim() {
        // The front-end shim falls back to the same constant when the chat
        // platform exposes no user; the two must not drift apart.
        let config = test_config();
        assert_eq!(config.fallback_shopper.as_i64(), 123_456);
    }
}
