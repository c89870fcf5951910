//! Segment codec: claim lists to base64url JSON objects and back.
//!
//! # Invariants
//! - Encoded segments use the URL-safe alphabet without `=` padding.
//! - Decoding maps `-`/`_` back to `+`/`/` and re-derives padding from the
//!   segment length, so padded or standard-alphabet segments also decode.
//! - Encoded JSON objects contain only string values, in claim order.
//! - Decoding accepts any JSON object and stringifies non-string values.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};
use serde_json::{Map, Value};

use crate::claims::{Claim, Claims};
use crate::error::{Segment, TokenError};

/// Standard-alphabet decoder applied after the URL-safe characters are mapped
/// back. Padding is re-derived before decoding; unused trailing bits are
/// ignored.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Base64url-encode bytes without padding.
#[must_use]
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a base64url segment.
///
/// `-` and `_` are translated to `+` and `/`, then `=` padding is added by
/// length remainder modulo 4: 2 adds `==`, 3 adds `=`, 0 adds nothing. A
/// remainder of 1 cannot be a base64 encoding of any byte string.
///
/// # Errors
/// Returns `TokenError::MalformedEncoding` for an impossible length or input
/// the standard base64 decoder rejects.
pub fn decode_base64url(segment: &str, which: Segment) -> Result<Vec<u8>, TokenError> {
    let padding = match segment.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => {
            return Err(TokenError::malformed_encoding(
                which,
                "invalid base64url length",
            ));
        }
    };

    let mut standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    standard.push_str(padding);

    STANDARD_LENIENT
        .decode(standard)
        .map_err(|e| TokenError::malformed_encoding(which, format!("invalid base64url: {e}")))
}

/// Serialize claims to a JSON object with string values.
///
/// A repeated name keeps its first position and takes the last value.
#[must_use]
pub fn claims_to_json(claims: &Claims) -> String {
    let mut object = Map::with_capacity(claims.len());
    for claim in claims {
        object.insert(claim.name.clone(), Value::String(claim.value.clone()));
    }
    Value::Object(object).to_string()
}

/// Encode claims as one token segment.
#[must_use]
pub fn encode_segment(claims: &Claims) -> String {
    encode_base64url(claims_to_json(claims).as_bytes())
}

/// Decode one token segment into claims, in document key order.
///
/// # Errors
/// Returns `TokenError::MalformedEncoding` if the segment is not base64url,
/// UTF-8, or a JSON object.
pub fn decode_segment(segment: &str, which: Segment) -> Result<Claims, TokenError> {
    let bytes = decode_base64url(segment, which)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| TokenError::malformed_encoding(which, format!("invalid UTF-8: {e}")))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| TokenError::malformed_encoding(which, format!("invalid JSON: {e}")))?;
    let Value::Object(object) = value else {
        return Err(TokenError::malformed_encoding(
            which,
            "expected a JSON object",
        ));
    };

    Ok(object
        .into_iter()
        .map(|(name, value)| Claim::new(name, stringify(value)))
        .collect())
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}
