//! End-to-end tests at the token string level.
//!
//! Each test file covers a specific scenario, going through the public
//! build, write, parse, and authenticate operations.

#![cfg(test)]

mod helpers;

mod test_concurrent_use;
mod test_purpose;
mod test_round_trip;
mod test_standard_claims;
mod test_structural_rejection;
