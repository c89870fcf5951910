//! HS256 token signing and signature verification.
//!
//! # Pre-conditions
//! - The signing key must be non-empty.
//!
//! # Post-conditions
//! - `write` output is always three unpadded base64url segments.
//! - `write` is deterministic for a given claim set and key.
//!
//! # Invariants
//! - The signature covers the header and payload segments exactly as they
//!   appear in the token string.
//! - Signature comparison is constant time.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::claims::ClaimSet;
use crate::config::{ConfigError, SIGNING_KEY_VAR, SigningKey};
use crate::encoding::{decode_base64url, encode_base64url, encode_segment};
use crate::error::{Segment, TokenError};

type HmacSha256 = Hmac<Sha256>;

/// Signs claim sets into token strings with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    /// HMAC state already keyed with the secret; cloned per token.
    mac: HmacSha256,
}

impl TokenSigner {
    /// Create a signer for `key`.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingValue` if the key is blank.
    pub fn new(key: &SigningKey) -> Result<Self, ConfigError> {
        if key.is_blank() {
            return Err(ConfigError::MissingValue(SIGNING_KEY_VAR.to_string()));
        }
        let mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| {
            ConfigError::InvalidValue {
                name: SIGNING_KEY_VAR.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self { mac })
    }

    /// Serialize, encode, and sign a claim set.
    ///
    /// Any signature already present on `token` is ignored.
    #[must_use]
    pub fn write(&self, token: &ClaimSet) -> String {
        let signing_input = format!(
            "{}.{}",
            encode_segment(&token.header),
            encode_segment(&token.payload)
        );
        let signature = self.sign(&signing_input);
        format!("{signing_input}.{signature}")
    }

    /// Check that the token's signature matches its header and payload.
    ///
    /// Only the signature is checked; claims are not decoded.
    ///
    /// # Errors
    /// Returns `TokenError::MalformedToken` if the token is not three
    /// segments, `TokenError::MalformedEncoding` if the signature segment is
    /// not base64url, and `TokenError::InvalidSignature` on a mismatch.
    pub fn verify(&self, token: &str) -> Result<(), TokenError> {
        let Some((signing_input, signature)) = token.rsplit_once('.') else {
            return Err(TokenError::MalformedToken);
        };
        if signing_input.matches('.').count() != 1 {
            return Err(TokenError::MalformedToken);
        }

        let signature = decode_base64url(signature, Segment::Signature)?;
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)
    }

    fn sign(&self, signing_input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        encode_base64url(&mac.finalize().into_bytes())
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &crate::claims::HS256)
            .finish_non_exhaustive()
    }
}
