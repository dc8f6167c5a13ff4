//! Environment-driven configuration for Smartmark.
//!
//! One backend, three values: where it lives, the publishable API key, and
//! the post-login redirect address handed to the OAuth flow.

use std::env;

use crate::types::errors::ConfigError;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "SMARTMARK_BACKEND_URL";
/// Environment variable holding the publishable API key.
pub const ENV_API_KEY: &str = "SMARTMARK_API_KEY";
/// Environment variable holding the post-login redirect address.
pub const ENV_REDIRECT_URL: &str = "SMARTMARK_REDIRECT_URL";

/// Default OAuth provider when the caller does not name one.
pub const DEFAULT_PROVIDER: &str = "google";

/// Backend connection settings, loaded once at startup and shared by the
/// composition root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the managed backend, without a trailing slash.
    pub base_url: String,
    /// Publishable API key sent with every request.
    pub api_key: String,
    /// Address the identity provider redirects to after sign-in.
    pub redirect_url: String,
}

impl Config {
    /// Builds a config from explicit values. Trailing slashes on the base URL
    /// are stripped so endpoint paths can be joined naively.
    pub fn new(base_url: &str, api_key: &str, redirect_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            redirect_url: redirect_url.to_string(),
        }
    }

    /// Loads the config from the environment.
    ///
    /// # Errors
    /// Returns `ConfigError::Missing` naming the first unset or empty
    /// variable encountered.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            &require(ENV_BACKEND_URL)?,
            &require(ENV_API_KEY)?,
            &require(ENV_REDIRECT_URL)?,
        ))
    }
}

fn require(var: &str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var.to_string())),
    }
}
