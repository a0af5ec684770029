//! Injectable time source.
//!
//! Signing stamps URLs with the current time and verification compares
//! against it, so both take a [`Clock`] argument instead of reading the system
//! time directly. Any `Fn() -> DateTime<Utc>` closure is a clock.

use chrono::{DateTime, Utc};

/// A source of the current UTC time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use urlguard_auth::clock::{Clock, FixedClock};
///
/// let t0 = Utc.with_ymd_and_hms(2020, 12, 31, 22, 0, 0).unwrap();
/// assert_eq!(FixedClock(t0).now(), t0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}
