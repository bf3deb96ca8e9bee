//! Account identifiers.
//!
//! An account is addressed by three non-negative 64-bit numbers:
//!
//! ```text
//! shard . realm . account        e.g. 0.0.1001
//! ```
//!
//! The string form is the only textual representation. Parsing is strict:
//! digits only, exactly three components, each no larger than `i64::MAX`
//! (the network encodes them as signed 64-bit integers).

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SdkError};

/// Largest value any component may take on the wire.
const MAX_COMPONENT: u64 = i64::MAX as u64;

const ACCOUNT_ID_SHAPE: &str = "shard.realm.account";

/// Identifier of a ledger account (also used for node accounts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    shard: u64,
    realm: u64,
    account: u64,
}

impl AccountId {
    /// Builds an account id from its components.
    ///
    /// # Panics
    ///
    /// If any component is larger than `i64::MAX`. Use [`AccountId::try_new`]
    /// or [`AccountId::parse`] for untrusted input.
    pub const fn new(shard: u64, realm: u64, account: u64) -> Self {
        assert!(
            shard <= MAX_COMPONENT && realm <= MAX_COMPONENT && account <= MAX_COMPONENT,
            "account id component exceeds i64::MAX"
        );
        Self {
            shard,
            realm,
            account,
        }
    }

    /// Fallible variant of [`AccountId::new`] for values decoded from the wire.
    pub fn try_new(shard: i64, realm: i64, account: i64) -> Result<Self> {
        match (
            u64::try_from(shard),
            u64::try_from(realm),
            u64::try_from(account),
        ) {
            (Ok(shard), Ok(realm), Ok(account)) => Ok(Self {
                shard,
                realm,
                account,
            }),
            _ => Err(SdkError::malformed(
                &format!("{shard}.{realm}.{account}"),
                ACCOUNT_ID_SHAPE,
            )),
        }
    }

    /// Parses the canonical `shard.realm.account` form.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        let (Some(shard), Some(realm), Some(account), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SdkError::malformed(s, ACCOUNT_ID_SHAPE));
        };

        Ok(Self {
            shard: parse_component(s, shard)?,
            realm: parse_component(s, realm)?,
            account: parse_component(s, account)?,
        })
    }

    /// Shard number.
    pub fn shard(&self) -> u64 {
        self.shard
    }

    /// Realm number.
    pub fn realm(&self) -> u64 {
        self.realm
    }

    /// Account number within the realm.
    pub fn account(&self) -> u64 {
        self.account
    }
}

/// Parses one numeric component. `u64::from_str` accepts a leading `+`, so
/// digits are checked explicitly first.
fn parse_component(input: &str, component: &str) -> Result<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SdkError::malformed(input, ACCOUNT_ID_SHAPE));
    }
    component
        .parse::<u64>()
        .ok()
        .filter(|value| *value <= MAX_COMPONENT)
        .ok_or_else(|| SdkError::malformed(input, ACCOUNT_ID_SHAPE))
}

impl FromStr for AccountId {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.account)
    }
}

// Serialized as the canonical string so ids read naturally in TOML and JSON.

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_canonical_string() {
        assert_eq!(AccountId::new(0, 0, 1001).to_string(), "0.0.1001");
        assert_eq!(AccountId::new(7, 5, 3).to_string(), "7.5.3");
    }

    #[test]
    fn parses_canonical_string() {
        let id: AccountId = "0.0.1001".parse().unwrap();
        assert_eq!(id, AccountId::new(0, 0, 1001));
        assert_eq!(id.shard(), 0);
        assert_eq!(id.realm(), 0);
        assert_eq!(id.account(), 1001);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "1.2", "1.2.-3", "a.b.c", "", "1.2.3.4", "1..3", "+1.2.3", " 1.2.3", "1.2.3 ", "1,2,3",
        ] {
            let err = AccountId::parse(input).unwrap_err();
            assert!(
                matches!(err, SdkError::MalformedIdentifier { .. }),
                "{input:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_components_beyond_i64() {
        let max = format!("0.0.{}", i64::MAX);
        assert_eq!(
            AccountId::parse(&max).unwrap(),
            AccountId::new(0, 0, i64::MAX as u64)
        );

        let over = format!("0.0.{}", i64::MAX as u64 + 1);
        assert!(AccountId::parse(&over).is_err());
        assert!(AccountId::parse("0.0.99999999999999999999999").is_err());
    }

    #[test]
    fn try_new_rejects_negative_components() {
        assert!(AccountId::try_new(0, 0, -1).is_err());
        assert_eq!(AccountId::try_new(1, 2, 3).unwrap(), AccountId::new(1, 2, 3));
    }

    #[test]
    #[should_panic(expected = "exceeds i64::MAX")]
    fn new_panics_beyond_i64() {
        let _ = AccountId::new(0, 0, u64::MAX);
    }

    #[test]
    fn format_parse_format_is_stable() {
        let first = AccountId::new(3, 14, 159).to_string();
        let second = AccountId::parse(&first).unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn serde_uses_string_form() {
        let id = AccountId::new(0, 0, 3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.3\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<AccountId>("\"0.0\"").is_err());
    }

    proptest! {
        #[test]
        fn parse_inverts_display(
            shard in 0..=i64::MAX as u64,
            realm in 0..=i64::MAX as u64,
            account in 0..=i64::MAX as u64,
        ) {
            let id = AccountId::new(shard, realm, account);
            prop_assert_eq!(AccountId::parse(&id.to_string()).unwrap(), id);
        }
    }
}
