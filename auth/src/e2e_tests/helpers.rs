//! Common helpers for end-to-end tests.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::TokenConfig;
use crate::manager::TokenManager;

pub const TEST_ISSUER: &str = "invenire";
pub const TEST_KEY: &str = "test_key";
pub const ADMIN_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const EMPLOYEE_ID: &str = "22222222-2222-2222-2222-222222222222";

/// The fixture configuration: `invenire`, `test_key`, 30 minutes.
pub fn test_config() -> TokenConfig {
    TokenConfig::new(TEST_ISSUER, TEST_KEY)
}

/// A manager on the system clock built from [`test_config`].
#[allow(clippy::expect_used)]
pub fn test_manager() -> TokenManager {
    TokenManager::new(&test_config()).expect("fixture config is valid")
}

/// Current Unix seconds, read independently of the crate's time source.
#[allow(clippy::cast_possible_wrap)]
pub fn unix_now() -> i64 {
    #[allow(clippy::expect_used)]
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch");
    elapsed.as_secs() as i64
}
