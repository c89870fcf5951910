//! Purpose-scoped tokens carry a `purpose` claim; session tokens do not.

use crate::claims::{Claim, EMAIL_VERIFICATION_PURPOSE};
use crate::e2e_tests::helpers::*;

#[test]
fn test_purpose_claim_round_trips() {
    let manager = test_manager();
    let claims = manager.builder().build(vec![
        Claim::new("employee_id", EMPLOYEE_ID),
        Claim::new("purpose", "email_verification"),
    ]);

    let parsed = manager
        .parser()
        .parse(&manager.signer().write(&claims))
        .expect("parse scoped token");
    assert_eq!(parsed.purpose(), Some("email_verification"));
}

#[test]
fn test_session_token_has_no_purpose() {
    let manager = test_manager();
    let token = manager.issue(vec![Claim::new("employee_id", EMPLOYEE_ID)]);

    let parsed = manager.parse(&token).expect("parse session token");
    assert_eq!(parsed.purpose(), None);
}

#[test]
fn test_issue_for_purpose_authenticates() {
    let manager = test_manager();
    let token = manager.issue_for_purpose(
        vec![Claim::new("employee_id", EMPLOYEE_ID)],
        EMAIL_VERIFICATION_PURPOSE,
    );

    let claims = manager.authenticate(&token).expect("authentic scoped token");
    assert_eq!(claims.purpose(), Some(EMAIL_VERIFICATION_PURPOSE));
    assert_eq!(claims.payload.count("purpose"), 1);
}
