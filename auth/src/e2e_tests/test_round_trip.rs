//! Caller claims survive build, write, and parse by name and value.

use crate::claims::Claim;
use crate::e2e_tests::helpers::*;

fn assert_round_trip(claims: &[(&str, &str)]) {
    let manager = test_manager();
    let input: Vec<Claim> = claims.iter().map(|&(n, v)| Claim::new(n, v)).collect();

    let token = manager.signer().write(&manager.builder().build(input));
    let parsed = manager.parser().parse(&token).expect("parse round trip");

    for &(name, value) in claims {
        assert_eq!(parsed.payload_claim(name), Some(value), "claim {name}");
    }
    assert_eq!(parsed.payload.len(), claims.len() + 3);
    assert!(parsed.signature.is_some());
}

#[test]
fn test_round_trip_single_claim() {
    assert_round_trip(&[("role", "ADMIN")]);
}

#[test]
fn test_round_trip_many_claims() {
    assert_round_trip(&[
        ("role", "EMPLOYEE"),
        ("employee_id", EMPLOYEE_ID),
        ("is_verified", "false"),
        ("department", "returns"),
        ("shift", "3"),
    ]);
}

#[test]
fn test_round_trip_awkward_values() {
    assert_round_trip(&[
        ("empty", ""),
        ("quotes", r#"say "hi""#),
        ("backslash", r"C:\path"),
        ("unicode", "Zoë ✓ 日本"),
        ("dots", "a.b.c"),
        ("json-looking", r#"{"nested":true}"#),
        ("newline", "line1\nline2"),
    ]);
}

#[test]
fn test_round_trip_keeps_build_order() {
    let manager = test_manager();
    let token = manager.issue(vec![
        Claim::new("zeta", "1"),
        Claim::new("alpha", "2"),
        Claim::new("mid", "3"),
    ]);
    let parsed = manager.parse(&token).expect("parse ordered token");

    let names: Vec<&str> = parsed.payload.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid", "iss", "aud", "exp"]);
}

#[test]
fn test_round_trip_duplicate_names_collapse_to_last() {
    let manager = test_manager();
    let token = manager.issue(vec![
        Claim::new("role", "EMPLOYEE"),
        Claim::new("role", "ADMIN"),
    ]);
    let parsed = manager.parse(&token).expect("parse duplicate token");

    assert_eq!(parsed.payload.count("role"), 1);
    assert_eq!(parsed.role(), Ok("ADMIN"));
}
