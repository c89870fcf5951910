//! Token configuration.
//!
//! Configuration is an explicit, immutable value handed to
//! [`TokenManager::new`](crate::TokenManager::new). It can be assembled in
//! code or loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `AUTH_TOKEN_ISSUER`: issuer and audience written into every token (required)
//! - `AUTH_TOKEN_SIGNING_KEY`: HMAC-SHA256 shared secret (required)
//! - `AUTH_TOKEN_EXPIRATION_MINUTES`: token lifetime in minutes (default: `30`)
//!
//! # Invariants
//!
//! - `issuer` and `signing_key` are never blank once validated.
//! - The signing key is never printed by `Debug`.

use std::fmt;

/// Environment variable holding the issuer.
pub const ISSUER_VAR: &str = "AUTH_TOKEN_ISSUER";
/// Environment variable holding the signing key.
pub const SIGNING_KEY_VAR: &str = "AUTH_TOKEN_SIGNING_KEY";
/// Environment variable holding the token lifetime in minutes.
pub const EXPIRATION_MINUTES_VAR: &str = "AUTH_TOKEN_EXPIRATION_MINUTES";

/// Error returned when token configuration is missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value is missing.
    MissingValue(String),
    /// A value is present but unusable.
    InvalidValue { name: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(name) => {
                write!(f, "missing required configuration value: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The shared HMAC secret.
///
/// `Debug` is redacted so configuration can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap raw key bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether the key is empty or only ASCII whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(u8::is_ascii_whitespace)
    }
}

impl From<&str> for SigningKey {
    fn from(key: &str) -> Self {
        Self(key.as_bytes().to_vec())
    }
}

impl From<String> for SigningKey {
    fn from(key: String) -> Self {
        Self(key.into_bytes())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes redacted>)", self.0.len())
    }
}

/// Issuer, signing key, and token lifetime.
///
/// # Pre-conditions
///
/// When constructed directly, call [`TokenConfig::validate`] (or let
/// `TokenManager::new` do it) before use.
///
/// # Post-conditions
///
/// When constructed via `from_env()` or `from_lookup()`, the config is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Written to both `iss` and `aud`.
    pub issuer: String,
    pub signing_key: SigningKey,
    /// Lifetime of issued tokens. May be zero or negative, which yields
    /// tokens that are already expired.
    pub expiration_minutes: i64,
}

impl TokenConfig {
    /// Default token lifetime in minutes.
    pub const DEFAULT_EXPIRATION_MINUTES: i64 = 30;

    /// Create a configuration with the default lifetime.
    #[must_use]
    pub fn new(issuer: impl Into<String>, signing_key: impl Into<SigningKey>) -> Self {
        Self {
            issuer: issuer.into(),
            signing_key: signing_key.into(),
            expiration_minutes: Self::DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub const fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    /// Token lifetime in seconds, saturating on overflow.
    #[must_use]
    pub const fn expiration_seconds(&self) -> i64 {
        self.expiration_minutes.saturating_mul(60)
    }

    /// Check that the issuer and key are usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingValue` if the issuer or key is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::MissingValue(ISSUER_VAR.to_string()));
        }
        if self.signing_key.is_blank() {
            return Err(ConfigError::MissingValue(SIGNING_KEY_VAR.to_string()));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `AUTH_TOKEN_ISSUER` or `AUTH_TOKEN_SIGNING_KEY` is not set or is blank
    /// - `AUTH_TOKEN_EXPIRATION_MINUTES` is set but not an integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary name to value lookup.
    ///
    /// Uses the same variable names and rules as [`TokenConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let issuer = Self::load_required(&lookup, ISSUER_VAR)?;
        let signing_key = Self::load_required(&lookup, SIGNING_KEY_VAR)?;
        let expiration_minutes = Self::load_expiration_minutes(&lookup)?;

        let config = Self {
            issuer,
            signing_key: SigningKey::from(signing_key),
            expiration_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    fn load_required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(name).ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: name.to_string(),
                message: "must not be blank".to_string(),
            });
        }
        Ok(value)
    }

    /// Returns the default if not set.
    fn load_expiration_minutes<F>(lookup: &F) -> Result<i64, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(EXPIRATION_MINUTES_VAR) {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: EXPIRATION_MINUTES_VAR.to_string(),
                    message: format!("'{value}' is not an integer"),
                }),
            None => Ok(Self::DEFAULT_EXPIRATION_MINUTES),
        }
    }
}
