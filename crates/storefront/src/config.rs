//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Shopify
//! - `SHOPIFY_STORE` (or `PUBLIC_SHOPIFY_DOMAIN`) - Store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_TOKEN` (or `PUBLIC_SHOPIFY_STOREFRONT_TOKEN`) - Storefront API access token
//! - `SHOPIFY_API_VERSION` (or `PUBLIC_STOREFRONT_API_VERSION`) - API version (default: 2024-07)
//! - `SHOPIFY_STOREFRONT_BASE_URL` - Base URL override for a local proxy
//!
//! Domain and token are not checked at startup. A missing value surfaces as
//! a configuration error on the first Storefront API call.
//!
//! ## Server
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Cart persistence
//! - `GOLDSABERTOOTH_DATA_DIR` - Directory for the persisted cart (default: .goldsabertooth)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default Storefront API version.
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Default directory for locally persisted state.
pub const DEFAULT_DATA_DIR: &str = ".goldsabertooth";

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
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Directory holding the persisted cart
    pub data_dir: PathBuf,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: Option<String>,
    /// Shopify API version (e.g., 2024-07)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: Option<SecretString>,
    /// Replaces `https://{store}` as the endpoint base when set
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or port cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(lookup, "STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_or_default(lookup, "STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            shopify: ShopifyStorefrontConfig::from_lookup(lookup),
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            data_dir: data_dir_from_lookup(lookup),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    /// Load the Shopify settings alone, for tools that never bind a server.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            store: first_of(lookup, &["SHOPIFY_STORE", "PUBLIC_SHOPIFY_DOMAIN"]),
            api_version: first_of(
                lookup,
                &["SHOPIFY_API_VERSION", "PUBLIC_STOREFRONT_API_VERSION"],
            )
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            access_token: first_of(
                lookup,
                &["SHOPIFY_STOREFRONT_TOKEN", "PUBLIC_SHOPIFY_STOREFRONT_TOKEN"],
            )
            .map(SecretString::from),
            base_url: lookup("SHOPIFY_STOREFRONT_BASE_URL"),
        }
    }

    /// Configuration for a store domain and token with the default API version.
    #[must_use]
    pub fn new(store: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            store: Some(store.into()),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: Some(SecretString::from(access_token.into())),
            base_url: None,
        }
    }

    /// Point the client at a different base URL (local proxy, mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Cart data directory from `GOLDSABERTOOTH_DATA_DIR`.
#[must_use]
pub fn data_dir_from_env() -> PathBuf {
    let _ = dotenvy::dotenv();
    data_dir_from_lookup(&env_lookup)
}

fn data_dir_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    PathBuf::from(get_or_default(lookup, "GOLDSABERTOOTH_DATA_DIR", DEFAULT_DATA_DIR))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a variable from the process environment, treating empty as unset.
fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// First variable present among `keys`.
fn first_of(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| lookup(key))
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = StorefrontConfig::from_lookup(&lookup_from(&[])).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.shopify.api_version, "2024-07");
        assert!(config.shopify.store.is_none());
        assert!(config.shopify.access_token.is_none());
        assert_eq!(config.data_dir, PathBuf::from(".goldsabertooth"));
    }

    #[test]
    fn test_public_variable_names_are_accepted() {
        let lookup = lookup_from(&[
            ("PUBLIC_SHOPIFY_DOMAIN", "gold-sabertooth.myshopify.com"),
            ("PUBLIC_SHOPIFY_STOREFRONT_TOKEN", "public-token"),
            ("PUBLIC_STOREFRONT_API_VERSION", "2025-01"),
        ]);
        let shopify = ShopifyStorefrontConfig::from_lookup(&lookup);

        assert_eq!(
            shopify.store.as_deref(),
            Some("gold-sabertooth.myshopify.com")
        );
        assert_eq!(
            shopify.access_token.unwrap().expose_secret(),
            "public-token"
        );
        assert_eq!(shopify.api_version, "2025-01");
    }

    #[test]
    fn test_primary_variable_names_take_precedence() {
        let lookup = lookup_from(&[
            ("SHOPIFY_STORE", "primary.myshopify.com"),
            ("PUBLIC_SHOPIFY_DOMAIN", "fallback.myshopify.com"),
        ]);
        let shopify = ShopifyStorefrontConfig::from_lookup(&lookup);
        assert_eq!(shopify.store.as_deref(), Some("primary.myshopify.com"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = StorefrontConfig::from_lookup(&lookup_from(&[("STOREFRONT_PORT", "http")]));
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"
        ));
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyStorefrontConfig::new("test.myshopify.com", "super_secret_token");

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }

    #[test]
    fn test_with_base_url() {
        let config = ShopifyStorefrontConfig::new("test.myshopify.com", "token")
            .with_base_url("http://127.0.0.1:4000");
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:4000"));
    }
}
