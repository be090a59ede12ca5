//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GROCERLY_API_BASE_URL` - Base URL of the delivery backend
//!   (e.g. `https://api.grocerly.example`)
//! - `GOOGLE_MAPS_API_KEY` - Google Geocoding API key
//!
//! ## Optional
//! - `GROCERLY_API_TOKEN` - Bearer token sent with backend requests
//! - `GROCERLY_TIMEOUT_SECS` - HTTP request timeout (default: 15)
//! - `GROCERLY_CACHE_TTL_SECS` - TTL for cached backend reads (default: 300)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Grocerly client configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the delivery backend, without trailing slash.
    pub api_base_url: String,
    /// Optional bearer token for backend requests.
    pub api_token: Option<SecretString>,
    /// Google Geocoding API key.
    pub maps_api_key: SecretString,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// TTL for cached backend reads (delivery days, profile).
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("maps_api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl ClientConfig {
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

        let api_base_url = get_required_env("GROCERLY_API_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let api_token = get_optional_env("GROCERLY_API_TOKEN").map(SecretString::from);
        let maps_api_key = SecretString::from(get_required_env("GOOGLE_MAPS_API_KEY")?);
        let timeout = Duration::from_secs(parse_env_or_default("GROCERLY_TIMEOUT_SECS", 15)?);
        let cache_ttl = Duration::from_secs(parse_env_or_default("GROCERLY_CACHE_TTL_SECS", 300)?);

        Ok(Self {
            api_base_url,
            api_token,
            maps_api_key,
            timeout,
            cache_ttl,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an optional numeric environment variable with a default.
fn parse_env_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "https://api.grocerly.example".to_string(),
            api_token: Some(SecretString::from("bearer-token-value")),
            maps_api_key: SecretString::from("maps-key-value"),
            timeout: Duration::from_secs(15),
            cache_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_output = format!("{:?}", test_config());

        assert!(debug_output.contains("https://api.grocerly.example"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("bearer-token-value"));
        assert!(!debug_output.contains("maps-key-value"));
    }
}
