//! The builder injects `iss`, `aud`, and `exp` exactly once.

use crate::claims::Claim;
use crate::config::TokenConfig;
use crate::e2e_tests::helpers::*;
use crate::manager::TokenManager;

#[test]
fn test_empty_build_injects_standard_claims() {
    let manager = test_manager();
    let before = unix_now();
    let token = manager.builder().build(Vec::new());
    let after = unix_now();

    assert_eq!(token.payload.len(), 3);
    assert_eq!(token.payload.count("iss"), 1);
    assert_eq!(token.payload.count("aud"), 1);
    assert_eq!(token.payload.count("exp"), 1);
    assert_eq!(token.issuer(), Some(TEST_ISSUER));
    assert_eq!(token.audience(), Some(TEST_ISSUER));

    let exp = token.expiration().expect("exp claim").as_unix_seconds();
    assert!(exp >= before + 1800 && exp <= after + 1800);
}

#[test]
fn test_caller_exp_is_not_duplicated() {
    let token = test_manager().builder().build(vec![Claim::new("exp", "123")]);

    assert_eq!(token.payload.count("exp"), 1);
    assert_eq!(token.payload_claim("exp"), Some("123"));
}

#[test]
fn test_configured_expiration_is_used() {
    let manager = TokenManager::new(&test_config().with_expiration_minutes(5))
        .expect("valid config");
    let token = manager.builder().build(Vec::new());

    let remaining = token.expiration().expect("exp claim").as_unix_seconds() - unix_now();
    assert!((295..=300).contains(&remaining), "exp is {remaining}s away");
}

#[test]
fn test_header_is_fixed() {
    let manager = TokenManager::new(&TokenConfig::new("other-issuer", "another key"))
        .expect("valid config");
    let token = manager.parse(&manager.issue(Vec::new())).expect("parse token");

    assert_eq!(token.header.len(), 2);
    assert_eq!(token.header_claim("alg"), Some("HS256"));
    assert_eq!(token.header_claim("typ"), Some("JWT"));
}
