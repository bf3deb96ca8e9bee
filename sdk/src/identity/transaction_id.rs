//! Transaction identifiers.
//!
//! A transaction id pairs the paying account with the instant the transaction
//! becomes valid. It is what a client later hands to the receipt query, so it
//! must be unique per payer. The textual form is `account@seconds.nanos`,
//! used for logs and for typing ids back in; it is not the wire form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::account_id::AccountId;
use super::timestamp::{Clock, SystemClock, Timestamp};
use crate::error::{Result, SdkError};

const TRANSACTION_ID_SHAPE: &str = "shard.realm.account@seconds.nanos";

/// Unique identifier of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    /// The account paying for the transaction.
    pub account_id: AccountId,
    /// Start of the validity window.
    pub valid_start: Timestamp,
}

impl TransactionId {
    /// New id for `payer`, starting now according to the system clock.
    pub fn new(payer: AccountId) -> Self {
        Self::with_clock(payer, &SystemClock)
    }

    /// New id for `payer`, starting at `clock.now()`.
    pub fn with_clock(payer: AccountId, clock: &dyn Clock) -> Self {
        Self {
            account_id: payer,
            valid_start: clock.now(),
        }
    }

    /// Builds an id from known parts, e.g. when correlating a receipt.
    pub const fn from_parts(account_id: AccountId, valid_start: Timestamp) -> Self {
        Self {
            account_id,
            valid_start,
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.account_id, self.valid_start)
    }
}

impl FromStr for TransactionId {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        let (account, start) = s
            .split_once('@')
            .ok_or_else(|| SdkError::malformed(s, TRANSACTION_ID_SHAPE))?;

        Ok(Self {
            account_id: account
                .parse()
                .map_err(|_| SdkError::malformed(s, TRANSACTION_ID_SHAPE))?,
            valid_start: start
                .parse()
                .map_err(|_| SdkError::malformed(s, TRANSACTION_ID_SHAPE))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::timestamp::FixedClock;

    #[test]
    fn display_matches_account_at_timestamp() {
        let id = TransactionId::from_parts(
            AccountId::new(7, 5, 1001),
            Timestamp::new(1_234_567, 10_001),
        );
        assert_eq!(id.to_string(), "7.5.1001@1234567.10001");
    }

    #[test]
    fn new_uses_payer_and_wall_clock() {
        let id = TransactionId::new(AccountId::new(0, 0, 1001));
        let text = id.to_string();

        let (account, start) = text.split_once('@').unwrap();
        assert_eq!(account, "0.0.1001");
        let (secs, nanos) = start.split_once('.').unwrap();
        assert!(secs.bytes().all(|b| b.is_ascii_digit()));
        assert!(nanos.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn parse_inverts_display() {
        let id = TransactionId::from_parts(
            AccountId::new(0, 0, 2),
            Timestamp::new(1_539_387_985, 758_025_699),
        );
        assert_eq!(id.to_string().parse::<TransactionId>().unwrap(), id);
    }

    #[test]
    fn parse_rejects_missing_parts() {
        for input in ["0.0.2", "0.0.2@", "@1.2", "0.0@1.2", "0.0.2@12"] {
            assert!(input.parse::<TransactionId>().is_err(), "{input:?}");
        }
    }

    #[test]
    fn ids_from_advancing_clock_differ() {
        let clock = FixedClock::new(Timestamp::new(1_700_000_000, 0));
        let payer = AccountId::new(0, 0, 1001);

        let first = TransactionId::with_clock(payer, &clock);
        clock.advance_nanos(1);
        let second = TransactionId::with_clock(payer, &clock);

        assert_ne!(first, second);
        assert_eq!(first.valid_start.seconds, second.valid_start.seconds);
    }
}
