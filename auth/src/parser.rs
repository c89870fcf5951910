//! Structural token parsing.
//!
//! The parser turns a token string back into a [`ClaimSet`]. It checks shape
//! and encoding only; it never checks the signature. Use
//! [`TokenSigner::verify`](crate::TokenSigner::verify) or
//! [`TokenManager::authenticate`](crate::TokenManager::authenticate) before
//! trusting any claim.

use crate::claims::ClaimSet;
use crate::encoding::decode_segment;
use crate::error::{Segment, TokenError};

/// Scheme prefix of an `Authorization` header carrying a token.
const BEARER_SCHEME: &str = "bearer";

/// Parses token strings into claim sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenParser;

impl TokenParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Split, decode, and deserialize a token string.
    ///
    /// The signature segment is carried through as-is.
    ///
    /// # Errors
    /// Returns `TokenError::MalformedToken` unless the string has exactly three
    /// `.`-separated segments, and `TokenError::MalformedEncoding` if the
    /// header or payload is not a base64url JSON object.
    pub fn parse(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::MalformedToken);
        };

        let header = decode_segment(header, Segment::Header)?;
        let payload = decode_segment(payload, Segment::Payload)?;

        Ok(ClaimSet::new(header, payload, Some(signature.to_string())))
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty credential.
#[must_use]
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, credential) = header_value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let credential = credential.trim();
    if credential.is_empty() {
        return None;
    }
    Some(credential)
}
