//! Token construction.
//!
//! # Post-conditions
//! - Every built claim set has the fixed `alg=HS256`, `typ=JWT` header.
//! - Every built payload has exactly one `iss`, `aud`, and `exp` unless the
//!   caller supplied duplicates of those names.
//! - Built claim sets carry no signature.

use crate::claims::{
    ALGORITHM, AUDIENCE, Claim, ClaimSet, Claims, EXPIRATION, HS256, ISSUER, JWT, TYPE,
};
use crate::time::{SystemTimeSource, TimeSource};

/// Builds unsigned claim sets for one issuer and token lifetime.
#[derive(Debug, Clone)]
pub struct TokenBuilder<T = SystemTimeSource> {
    issuer: String,
    expiration_seconds: i64,
    time_source: T,
}

impl TokenBuilder<SystemTimeSource> {
    /// Create a builder that stamps `exp` from the system clock.
    #[must_use]
    pub fn new(issuer: impl Into<String>, expiration_seconds: i64) -> Self {
        Self::with_time_source(issuer, expiration_seconds, SystemTimeSource)
    }
}

impl<T: TimeSource> TokenBuilder<T> {
    /// Create a builder that stamps `exp` from `time_source`.
    #[must_use]
    pub fn with_time_source(issuer: impl Into<String>, expiration_seconds: i64, time_source: T) -> Self {
        Self {
            issuer: issuer.into(),
            expiration_seconds,
            time_source,
        }
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub const fn expiration_seconds(&self) -> i64 {
        self.expiration_seconds
    }

    #[must_use]
    pub const fn time_source(&self) -> &T {
        &self.time_source
    }

    /// Build an unsigned claim set around the caller's payload claims.
    ///
    /// Caller claims are kept in order, duplicates included. `iss`, `aud`,
    /// and `exp` are appended only when the caller did not supply them.
    #[must_use]
    pub fn build<I>(&self, claims: I) -> ClaimSet
    where
        I: IntoIterator<Item = Claim>,
    {
        let header: Claims = vec![Claim::new(ALGORITHM, HS256), Claim::new(TYPE, JWT)].into();

        let mut payload: Claims = claims.into_iter().collect();
        payload.push_if_absent(ISSUER, || self.issuer.clone());
        payload.push_if_absent(AUDIENCE, || self.issuer.clone());
        payload.push_if_absent(EXPIRATION, || {
            self.time_source
                .now()
                .saturating_add_seconds(self.expiration_seconds)
                .to_string()
        });

        ClaimSet::new(header, payload, None)
    }
}
