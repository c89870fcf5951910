//! Token manager: one builder, signer, and parser bound to one configuration.
//!
//! # Pre-conditions
//! - The configuration must name a non-blank issuer and signing key.
//!
//! # Post-conditions
//! - Construction either fails with a `ConfigError` or yields a manager whose
//!   operations cannot fail for configuration reasons.
//!
//! # Invariants
//! - The manager is immutable after construction and `Send + Sync` whenever
//!   its time source is.

use crate::builder::TokenBuilder;
use crate::claims::{Claim, ClaimSet, HS256, PURPOSE};
use crate::config::{ConfigError, TokenConfig};
use crate::error::TokenError;
use crate::parser::TokenParser;
use crate::signer::TokenSigner;
use crate::time::{SystemTimeSource, TimeSource};

/// Issues and authenticates tokens for one issuer and key.
#[derive(Debug, Clone)]
pub struct TokenManager<T = SystemTimeSource> {
    builder: TokenBuilder<T>,
    signer: TokenSigner,
    parser: TokenParser,
}

impl TokenManager<SystemTimeSource> {
    /// Create a manager that reads the system clock.
    ///
    /// # Errors
    /// Returns `ConfigError` if the issuer or signing key is blank.
    pub fn new(config: &TokenConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> TokenManager<T> {
    /// Create a manager that reads time from `time_source`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the issuer or signing key is blank.
    pub fn with_time_source(config: &TokenConfig, time_source: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let signer = TokenSigner::new(&config.signing_key)?;
        let builder =
            TokenBuilder::with_time_source(&config.issuer, config.expiration_seconds(), time_source);

        tracing::debug!(
            issuer = %config.issuer,
            expiration_minutes = config.expiration_minutes,
            "token manager configured"
        );

        Ok(Self {
            builder,
            signer,
            parser: TokenParser::new(),
        })
    }

    #[must_use]
    pub const fn builder(&self) -> &TokenBuilder<T> {
        &self.builder
    }

    #[must_use]
    pub const fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    #[must_use]
    pub const fn parser(&self) -> &TokenParser {
        &self.parser
    }

    /// Build and sign a token around `claims`.
    #[must_use]
    pub fn issue<I>(&self, claims: I) -> String
    where
        I: IntoIterator<Item = Claim>,
    {
        self.signer.write(&self.builder.build(claims))
    }

    /// Build and sign a token scoped to a single `purpose`.
    #[must_use]
    pub fn issue_for_purpose<I>(&self, claims: I, purpose: &str) -> String
    where
        I: IntoIterator<Item = Claim>,
    {
        self.issue(
            claims
                .into_iter()
                .chain(std::iter::once(Claim::new(PURPOSE, purpose))),
        )
    }

    /// Parse without verifying; see [`TokenParser::parse`].
    pub fn parse(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.parser.parse(token)
    }

    /// Verify and parse a token presented by a client.
    ///
    /// Checks, in order: signature, structure, `alg`, `iss`, `aud`, and `exp`
    /// against the manager's clock.
    ///
    /// # Errors
    /// Returns the first failing check as a `TokenError`.
    pub fn authenticate(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.signer.verify(token)?;
        let claims = self.parser.parse(token)?;

        match claims.algorithm() {
            Some(HS256) => {}
            other => {
                return Err(TokenError::UnsupportedAlgorithm(
                    other.unwrap_or_default().to_string(),
                ));
            }
        }

        let issuer = self.builder.issuer();
        if claims.issuer() != Some(issuer) {
            return Err(TokenError::InvalidIssuer);
        }
        if claims.audience() != Some(issuer) {
            return Err(TokenError::InvalidAudience);
        }
        if claims.is_expired_at(self.builder.time_source().now())? {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}
