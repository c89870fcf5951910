//! Malformed strings are rejected with typed errors, never panics.

use crate::e2e_tests::helpers::*;
use crate::encoding::encode_base64url;
use crate::error::{Segment, TokenError};

#[test]
fn test_wrong_segment_counts() {
    let manager = test_manager();
    for token in ["onlyonepart", "a.b", "a.b.c.d", "", "...."] {
        assert_eq!(
            manager.parse(token),
            Err(TokenError::MalformedToken),
            "token {token:?}"
        );
        assert_eq!(manager.authenticate(token), Err(TokenError::MalformedToken));
    }
}

#[test]
fn test_extra_segment_on_valid_token() {
    let manager = test_manager();
    let token = format!("{}.extra", manager.issue(Vec::new()));
    assert_eq!(manager.parse(&token), Err(TokenError::MalformedToken));
}

#[test]
fn test_impossible_base64_length() {
    let manager = test_manager();
    let valid = manager.issue(Vec::new());
    let mut parts: Vec<String> = valid.split('.').map(str::to_string).collect();
    parts[0].push('A');
    while parts[0].len() % 4 != 1 {
        parts[0].push('A');
    }

    assert!(matches!(
        manager.parse(&parts.join(".")),
        Err(TokenError::MalformedEncoding {
            segment: Segment::Header,
            ..
        })
    ));
}

#[test]
fn test_payload_not_json() {
    let manager = test_manager();
    let valid = manager.issue(Vec::new());
    let mut parts: Vec<String> = valid.split('.').map(str::to_string).collect();
    parts[1] = encode_base64url(b"role=ADMIN");

    let result = manager.parse(&parts.join("."));
    assert!(matches!(
        result,
        Err(TokenError::MalformedEncoding {
            segment: Segment::Payload,
            ..
        })
    ));
    assert!(result.is_err_and(|e| e.is_rejection()));
}

#[test]
fn test_garbage_input_rejected_with_typed_errors() {
    let manager = test_manager();
    let rejected_in = |input: &str| match manager.parse(input) {
        Err(TokenError::MalformedEncoding { segment, .. }) => Some(segment),
        _ => None,
    };

    assert_eq!(rejected_in("\u{0}.\u{0}.\u{0}"), Some(Segment::Header));
    assert_eq!(rejected_in("é.é.é"), Some(Segment::Header));
    assert_eq!(rejected_in("eyJ.eyJ.eyJ"), Some(Segment::Header));
    assert_eq!(rejected_in("=.=.="), Some(Segment::Header));
    assert_eq!(rejected_in("e30.W10.sig"), Some(Segment::Payload));
    assert_eq!(manager.parse("...."), Err(TokenError::MalformedToken));

    // Structurally valid, so only authentication turns it away.
    let empty = manager.parse("e30.e30.e30").expect("empty claim lists");
    assert!(empty.header.is_empty() && empty.payload.is_empty());
    assert_eq!(
        manager.authenticate("e30.e30.e30"),
        Err(TokenError::InvalidSignature)
    );

    for input in ["\u{0}.\u{0}.\u{0}", "....", "é.é.é", "eyJ.eyJ.eyJ", "e30.W10.sig", "=.=.="] {
        assert!(manager.authenticate(input).is_err(), "input {input:?}");
    }
}
