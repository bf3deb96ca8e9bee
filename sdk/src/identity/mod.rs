//! # Identity Module
//!
//! Value types that name things on the ledger:
//!
//! ```text
//! account_id.rs     — AccountId, "shard.realm.account"
//! timestamp.rs      — Timestamp plus the Clock capability
//! transaction_id.rs — TransactionId, "account@seconds.nanos"
//! ```
//!
//! All of them are immutable `Copy` values with structural equality. They do
//! no I/O; the only failure mode is a parse error
//! ([`SdkError::MalformedIdentifier`](crate::error::SdkError::MalformedIdentifier)).

pub mod account_id;
pub mod timestamp;
pub mod transaction_id;

pub use account_id::AccountId;
pub use timestamp::{Clock, FixedClock, SystemClock, Timestamp};
pub use transaction_id::TransactionId;
