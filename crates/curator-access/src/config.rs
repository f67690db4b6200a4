//! Configuration for the authorization core.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults for local development. The bootstrap identity lives here so
//! the core carries no embedded environment-specific assumptions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use curator_tenancy::normalize_email;

/// Default cap on slug regeneration attempts after a uniqueness conflict.
pub const DEFAULT_SLUG_RETRY_MAX: u32 = 4;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for the authorization core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Bootstrap identity allowed to register as a platform Admin without
    /// a ledger entry. Stored normalized; `None` disables the escape
    /// hatch entirely.
    pub bootstrap_admin_email: Option<String>,

    /// Maximum attempts when regenerating a slug after a uniqueness
    /// conflict. Always at least 1.
    pub slug_retry_max: u32,
}

impl Default for AccessConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            bootstrap_admin_email: None,
            slug_retry_max: DEFAULT_SLUG_RETRY_MAX,
        }
    }
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CURATOR_BOOTSTRAP_ADMIN_EMAIL`: bootstrap identity for initial
    ///   system setup (default: unset, escape hatch disabled)
    /// - `CURATOR_SLUG_RETRY_MAX`: slug regeneration attempts
    ///   (default: 4, must be at least 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(email) = std::env::var("CURATOR_BOOTSTRAP_ADMIN_EMAIL") {
            let normalized = normalize_email(&email);
            if !normalized.contains('@') {
                return Err(ConfigError::InvalidValue {
                    key: "CURATOR_BOOTSTRAP_ADMIN_EMAIL".to_string(),
                    message: format!("not an email address: {email:?}"),
                });
            }
            config.bootstrap_admin_email = Some(normalized);
        }

        if let Ok(raw) = std::env::var("CURATOR_SLUG_RETRY_MAX") {
            let parsed: u32 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CURATOR_SLUG_RETRY_MAX".to_string(),
                message: format!("not an integer: {raw:?}"),
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "CURATOR_SLUG_RETRY_MAX".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.slug_retry_max = parsed;
        }

        Ok(config)
    }

    /// Set the bootstrap identity (normalized on the way in).
    pub fn with_bootstrap_admin(mut self, email: impl AsRef<str>) -> Self {
        self.bootstrap_admin_email = Some(normalize_email(email.as_ref()));
        self
    }

    /// Check whether an already-normalized email is the bootstrap
    /// identity.
    pub fn is_bootstrap_email(&self, normalized_email: &str) -> bool {
        self.bootstrap_admin_email.as_deref() == Some(normalized_email)
    }
}
