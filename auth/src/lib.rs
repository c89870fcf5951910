// Life of a token:
// 1. Login, registration, or a purpose-scoped action supplies payload claims
// 2. TokenBuilder adds the fixed header and the iss / aud / exp claims
// 3. TokenSigner encodes header and payload and appends the HMAC-SHA256 digest
// 4. The string goes back to the client
// 5. On later requests the bearer string comes back:
//     - TokenParser rebuilds the claim set (shape only)
//     - TokenManager::authenticate also checks signature, issuer, and expiry
//
// Components:
//  - Claim model and typed readers
//  - Builder / signer / parser
//  - Manager binding them to one configuration

pub mod builder;
pub mod claims;
pub mod config;
pub mod encoding;
pub mod error;
pub mod manager;
pub mod parser;
pub mod signer;
pub mod time;

#[cfg(test)]
mod e2e_tests;

pub use builder::TokenBuilder;
pub use claims::{Claim, ClaimSet, Claims, Principal};
pub use config::{ConfigError, SigningKey, TokenConfig};
pub use error::{Segment, TokenError};
pub use manager::TokenManager;
pub use parser::{TokenParser, bearer_token};
pub use signer::TokenSigner;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource, Timestamp};
