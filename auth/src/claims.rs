//! The in-memory claim set shared by the builder, signer, and parser.
//!
//! A [`ClaimSet`] holds header claims, payload claims, and an optional
//! signature. Claims are ordered `(name, value)` string pairs; names may
//! repeat and unknown names are carried through untouched.
//!
//! # Invariants
//! - Claim values are always strings. Booleans and timestamps are stored in
//!   their textual form and re-parsed by the typed readers below.
//! - Lookups return the first claim with a matching name.

use serde::Serialize;

use crate::error::TokenError;
use crate::time::Timestamp;

/// Header claim naming the signing algorithm.
pub const ALGORITHM: &str = "alg";
/// Header claim naming the token type.
pub const TYPE: &str = "typ";
/// The only algorithm this crate signs with.
pub const HS256: &str = "HS256";
/// The fixed token type.
pub const JWT: &str = "JWT";

/// Payload claim naming the issuer.
pub const ISSUER: &str = "iss";
/// Payload claim naming the intended audience.
pub const AUDIENCE: &str = "aud";
/// Payload claim holding the expiration as Unix seconds.
pub const EXPIRATION: &str = "exp";
/// Payload claim holding the principal's role.
pub const ROLE: &str = "role";
/// Payload claim scoping a token to one action.
pub const PURPOSE: &str = "purpose";
/// Payload claim holding an administrator id.
pub const ADMIN_ID: &str = "admin_id";
/// Payload claim holding an employee id.
pub const EMPLOYEE_ID: &str = "employee_id";
/// Payload claim holding the account verification flag.
pub const IS_VERIFIED: &str = "is_verified";

/// Purpose value for email verification tokens.
pub const EMAIL_VERIFICATION_PURPOSE: &str = "email_verification";

/// A single named string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Claim {
    /// Claim name.
    pub name: String,
    /// Claim value, always in string form.
    pub value: String,
}

impl Claim {
    /// Create a claim.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a boolean claim using the `"true"` / `"false"` wire form.
    #[must_use]
    pub fn flag(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, value.to_string())
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Claim {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// An ordered list of claims that may contain repeated names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Claims(Vec<Claim>);

impl Claims {
    /// An empty claim list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a claim, keeping any existing claim with the same name.
    pub fn push(&mut self, claim: Claim) {
        self.0.push(claim);
    }

    /// Append `name = value` unless a claim with that name already exists.
    ///
    /// Returns `true` if the claim was appended.
    pub fn push_if_absent(&mut self, name: &str, value: impl FnOnce() -> String) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(Claim::new(name, value()));
        true
    }

    /// Value of the first claim named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|claim| claim.name == name)
            .map(|claim| claim.value.as_str())
    }

    /// Whether any claim is named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|claim| claim.name == name)
    }

    /// Number of claims named `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|claim| claim.name == name).count()
    }

    /// Iterate claims in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Claim>> for Claims {
    fn from(claims: Vec<Claim>) -> Self {
        Self(claims)
    }
}

impl FromIterator<Claim> for Claims {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Claim> for Claims {
    fn extend<I: IntoIterator<Item = Claim>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Claims {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The authenticated subject named by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// An administrator, identified by `admin_id`.
    Admin(String),
    /// A staff member, identified by `employee_id`.
    Employee(String),
}

impl Principal {
    /// The subject id regardless of principal kind.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Admin(id) | Self::Employee(id) => id,
        }
    }
}

/// A token's claims: header, payload, and the signature once written.
///
/// Built by [`TokenBuilder`](crate::TokenBuilder) without a signature and
/// reconstructed by [`TokenParser`](crate::TokenParser) with one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSet {
    pub header: Claims,
    pub payload: Claims,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ClaimSet {
    /// Assemble a claim set from its parts.
    #[must_use]
    pub const fn new(header: Claims, payload: Claims, signature: Option<String>) -> Self {
        Self {
            header,
            payload,
            signature,
        }
    }

    #[must_use]
    pub fn header_claim(&self, name: &str) -> Option<&str> {
        self.header.get(name)
    }

    #[must_use]
    pub fn payload_claim(&self, name: &str) -> Option<&str> {
        self.payload.get(name)
    }

    /// The `alg` header claim.
    #[must_use]
    pub fn algorithm(&self) -> Option<&str> {
        self.header_claim(ALGORITHM)
    }

    /// The `role` claim.
    ///
    /// # Errors
    /// Returns `TokenError::MissingClaim` if the payload has no `role`.
    pub fn role(&self) -> Result<&str, TokenError> {
        self.required(ROLE)
    }

    /// The `purpose` claim, absent on general session tokens.
    #[must_use]
    pub fn purpose(&self) -> Option<&str> {
        self.payload_claim(PURPOSE)
    }

    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.payload_claim(ISSUER)
    }

    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.payload_claim(AUDIENCE)
    }

    /// The `exp` claim parsed as base-10 Unix seconds.
    ///
    /// # Errors
    /// Returns `TokenError::MissingClaim` if `exp` is absent and
    /// `TokenError::MalformedClaim` if it is not an integer.
    pub fn expiration(&self) -> Result<Timestamp, TokenError> {
        let raw = self.required(EXPIRATION)?;
        raw.parse::<i64>()
            .map(Timestamp::from_unix_seconds)
            .map_err(|_| TokenError::malformed_claim(EXPIRATION, format!("'{raw}' is not an integer")))
    }

    /// Whether the token is expired at `now`; a token expires at its `exp` second.
    pub fn is_expired_at(&self, now: Timestamp) -> Result<bool, TokenError> {
        Ok(self.expiration()? <= now)
    }

    /// The `is_verified` claim.
    ///
    /// Accepts `true` and `false` in any letter case, since issuers have
    /// emitted both `"true"` and `"True"`.
    pub fn is_verified(&self) -> Result<bool, TokenError> {
        let raw = self.required(IS_VERIFIED)?;
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(TokenError::malformed_claim(
                IS_VERIFIED,
                format!("'{raw}' is not a boolean"),
            ))
        }
    }

    /// The subject this token was issued to.
    ///
    /// `admin_id` takes precedence when both subject claims are present.
    ///
    /// # Errors
    /// Returns `TokenError::MissingPrincipal` if neither claim is present.
    pub fn principal(&self) -> Result<Principal, TokenError> {
        if let Some(id) = self.payload_claim(ADMIN_ID) {
            return Ok(Principal::Admin(id.to_string()));
        }
        if let Some(id) = self.payload_claim(EMPLOYEE_ID) {
            return Ok(Principal::Employee(id.to_string()));
        }
        Err(TokenError::MissingPrincipal)
    }

    fn required(&self, name: &str) -> Result<&str, TokenError> {
        self.payload_claim(name)
            .ok_or_else(|| TokenError::MissingClaim(name.to_string()))
    }
}
