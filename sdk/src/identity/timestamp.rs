//! Timestamps and the clock that produces them.
//!
//! A [`Timestamp`] is only used as the "valid start" component of a
//! [`TransactionId`](super::TransactionId). Nanosecond resolution is what keeps
//! two ids for the same payer apart within one second; there is no extra
//! deduplication.
//!
//! Time is read through the [`Clock`] trait so tests can pin it.

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SdkError};

const TIMESTAMP_SHAPE: &str = "seconds.nanos";

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TimestampParts")]
pub struct Timestamp {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Sub-second part, `0..1_000_000_000`.
    pub nanos: i32,
}

impl Timestamp {
    /// Builds a timestamp from trusted parts. `nanos` must be in
    /// `0..1_000_000_000`; use [`Timestamp::try_new`] for anything read from
    /// outside the process.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Builds a timestamp, rejecting `nanos` outside `0..1_000_000_000`.
    pub fn try_new(seconds: i64, nanos: i32) -> Result<Self> {
        if !(0..NANOS_PER_SECOND).contains(&nanos) {
            return Err(SdkError::malformed(
                &format!("{seconds}.{nanos}"),
                TIMESTAMP_SHAPE,
            ));
        }
        Ok(Self { seconds, nanos })
    }

    /// Reads the system wall clock.
    pub fn now() -> Self {
        SystemClock.now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.seconds, self.nanos)
    }
}

impl FromStr for Timestamp {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        let (seconds, nanos) = s
            .split_once('.')
            .ok_or_else(|| SdkError::malformed(s, TIMESTAMP_SHAPE))?;

        let seconds = seconds
            .parse::<i64>()
            .map_err(|_| SdkError::malformed(s, TIMESTAMP_SHAPE))?;
        let nanos = nanos
            .parse::<i32>()
            .map_err(|_| SdkError::malformed(s, TIMESTAMP_SHAPE))?;

        Self::try_new(seconds, nanos).map_err(|_| SdkError::malformed(s, TIMESTAMP_SHAPE))
    }
}

#[derive(Deserialize)]
struct TimestampParts {
    seconds: i64,
    nanos: i32,
}

impl TryFrom<TimestampParts> for Timestamp {
    type Error = SdkError;

    fn try_from(parts: TimestampParts) -> Result<Self> {
        Self::try_new(parts.seconds, parts.nanos)
    }
}

/// Source of "now" for new transaction ids.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = Utc::now();
        Timestamp {
            seconds: now.timestamp(),
            nanos: now.timestamp_subsec_nanos() as i32,
        }
    }
}

/// A clock that only moves when told to. Used for deterministic ids.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<Timestamp>,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: Timestamp) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    /// Moves the clock forward by `nanos` nanoseconds. Saturates at the
    /// largest representable second.
    pub fn advance_nanos(&self, nanos: u64) {
        let mut current = self.current.lock();
        let per_second = i128::from(NANOS_PER_SECOND);
        let total = i128::from(current.seconds) * per_second
            + i128::from(current.nanos)
            + i128::from(nanos);

        match i64::try_from(total.div_euclid(per_second)) {
            Ok(seconds) => {
                current.seconds = seconds;
                // rem_euclid keeps this in 0..1_000_000_000.
                current.nanos = total.rem_euclid(per_second) as i32;
            }
            Err(_) => {
                current.seconds = i64::MAX;
                current.nanos = NANOS_PER_SECOND - 1;
            }
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
