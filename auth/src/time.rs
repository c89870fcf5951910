//! Time source abstraction for token expiration.
//!
//! Production code reads the system clock through [`SystemTimeSource`]; tests
//! pin the clock with [`FixedTimeSource`] so expiration values are exact.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A point in time as whole seconds since the Unix epoch.
///
/// Signed because `exp` values read off the wire may be any base-10 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from Unix seconds.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Unix seconds of this timestamp.
    #[must_use]
    pub const fn as_unix_seconds(self) -> i64 {
        self.0
    }

    /// The timestamp `seconds` later, saturating at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add_seconds(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Abstraction over the current time.
pub trait TimeSource {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// Real time source using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    #[allow(clippy::cast_possible_wrap)] // Seconds won't exceed i64::MAX for billions of years
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as negative seconds rather than failing.
        let seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            Err(before_epoch) => -(before_epoch.duration().as_secs() as i64),
        };
        Timestamp(seconds)
    }
}

/// A time source frozen at one instant.
///
/// `Copy` and free of interior mutability, so a builder holding one stays
/// `Send + Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource(Timestamp);

impl FixedTimeSource {
    /// Freeze the clock at the given Unix seconds.
    #[must_use]
    pub const fn at(seconds: i64) -> Self {
        Self(Timestamp(seconds))
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
