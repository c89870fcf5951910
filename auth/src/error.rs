//! Errors produced while building, writing, parsing, and authenticating tokens.
//!
//! Every failure is a distinct variant so the calling layer can decide how to
//! answer the request. Nothing in this crate retries or swallows these errors.
//!
//! # Invariants
//! - Error messages never contain the signing key or the raw token.

use std::fmt;

use crate::claims::{ADMIN_ID, EMPLOYEE_ID};

/// Which of the three token segments an encoding error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The first segment (`alg`, `typ`).
    Header,
    /// The second segment (application claims).
    Payload,
    /// The third segment (HMAC digest).
    Signature,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Payload => write!(f, "payload"),
            Self::Signature => write!(f, "signature"),
        }
    }
}

/// Error returned when a token cannot be parsed, read, or trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not split into exactly three `.`-separated segments.
    MalformedToken,
    /// A segment is not valid base64url, UTF-8, or a JSON object.
    MalformedEncoding {
        /// The segment that failed to decode.
        segment: Segment,
        /// What was wrong with it.
        reason: String,
    },
    /// A required claim is absent.
    MissingClaim(String),
    /// Neither `admin_id` nor `employee_id` is present.
    MissingPrincipal,
    /// A claim is present but its value cannot be interpreted.
    MalformedClaim {
        /// Name of the offending claim.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The signature does not match the header and payload.
    InvalidSignature,
    /// The `exp` claim is at or before the current time.
    TokenExpired,
    /// The header names an algorithm other than HS256.
    UnsupportedAlgorithm(String),
    /// The `iss` claim does not match the configured issuer.
    InvalidIssuer,
    /// The `aud` claim does not match the configured audience.
    InvalidAudience,
}

impl TokenError {
    pub(crate) fn malformed_encoding(segment: Segment, reason: impl Into<String>) -> Self {
        Self::MalformedEncoding {
            segment,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_claim(name: &str, reason: impl Into<String>) -> Self {
        Self::MalformedClaim {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error means the presented credential must be rejected.
    ///
    /// Everything except [`TokenError::MissingClaim`] and
    /// [`TokenError::MissingPrincipal`] describes a corrupt,
    /// forged, or stale credential. A missing claim on an otherwise valid
    /// token is a contract violation the caller has to classify itself.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::MissingClaim(_) | Self::MissingPrincipal)
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "invalid token format"),
            Self::MalformedEncoding { segment, reason } => {
                write!(f, "malformed {segment} segment: {reason}")
            }
            Self::MissingClaim(name) => write!(f, "missing '{name}' claim"),
            Self::MissingPrincipal => {
                write!(f, "missing '{ADMIN_ID}' or '{EMPLOYEE_ID}' claim")
            }
            Self::MalformedClaim { name, reason } => {
                write!(f, "malformed '{name}' claim: {reason}")
            }
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::TokenExpired => write!(f, "token has expired"),
            Self::UnsupportedAlgorithm(alg) => write!(f, "unsupported algorithm: {alg}"),
            Self::InvalidIssuer => write!(f, "token issuer does not match"),
            Self::InvalidAudience => write!(f, "token audience does not match"),
        }
    }
}

impl std::error::Error for TokenError {}
