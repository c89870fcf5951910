//! One manager shared across threads without coordination.

use std::sync::Arc;
use std::thread;

use crate::claims::Claim;
use crate::e2e_tests::helpers::*;

#[test]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected
fn test_shared_manager_across_threads() {
    let manager = Arc::new(test_manager());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let id = format!("employee-{i}");
                let token = manager.issue(vec![Claim::new("employee_id", id.clone())]);
                let claims = manager.authenticate(&token).expect("authentic token");
                assert_eq!(claims.payload_claim("employee_id"), Some(id.as_str()));
                token
            })
        })
        .collect();

    let tokens: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread finished"))
        .collect();
    let unique: std::collections::HashSet<&String> = tokens.iter().collect();
    assert_eq!(unique.len(), tokens.len());
}
