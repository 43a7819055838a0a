// Copyright (c) 2025 - Cowboy AI, Inc.

//! Log Store connection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the Log Store base URL
pub const ENV_URL: &str = "EVENTSTORE_URL";
/// Environment variable holding the admin user name
pub const ENV_ADMIN_USER: &str = "EVENTSTORE_ADMIN_USER";
/// Environment variable holding the admin password
pub const ENV_ADMIN_PASSWORD: &str = "EVENTSTORE_ADMIN_PASSWORD";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "EVENTSTORE_TIMEOUT_SECS";

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Log store URL must start with http:// or https://: {0}")]
    InvalidUrl(String),
}

/// Configuration for the Log Store connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStoreConfig {
    /// Base URL (e.g., "http://localhost:2113")
    pub base_url: String,

    /// Admin user for projection management
    pub admin_user: String,

    /// Admin password for projection management
    pub admin_password: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for LogStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2113".to_string(),
            admin_user: "admin".to_string(),
            admin_password: "changeit".to_string(),
            timeout_secs: default_timeout(),
        }
    }
}

impl LogStoreConfig {
    /// Create a configuration for the given base URL with default credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: ENV_TIMEOUT_SECS,
                    value: raw,
                })?,
            None => defaults.timeout_secs,
        };

        let config = Self {
            base_url: lookup(ENV_URL).unwrap_or(defaults.base_url),
            admin_user: lookup(ENV_ADMIN_USER).unwrap_or(defaults.admin_user),
            admin_password: lookup(ENV_ADMIN_PASSWORD).unwrap_or(defaults.admin_password),
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the admin credentials
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin_user = user.into();
        self.admin_password = password.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check the base URL scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidUrl(self.base_url.clone()))
        }
    }

    /// Base URL without trailing slashes
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
