//! # Transaction Module
//!
//! Construction, signing and submission of ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs    — TransactionBody slot, TransactionState, TransactionResponse
//! builder.rs  — Transaction<B>: setters, canonical bytes, execute
//! signing.rs  — Transaction::sign and signature verification
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`Client::transaction`](crate::Client::transaction), then
//!    set operator, node, memo, fee.
//! 2. **Sign** — [`Transaction::sign`] once per required key. The first
//!    signature fixes the transaction id and freezes the signed fields. A
//!    client with an operator key signs unsigned operator transactions at
//!    execution.
//! 3. **Execute** — [`Transaction::execute`] submits once and returns the
//!    node's [`TransactionResponse`]. The transaction is then `Sent` for good.
//! 4. **Receipt** — query the outcome with
//!    [`Client::get_transaction_receipt`](crate::Client::get_transaction_receipt).
//!
//! ## Design Decisions
//!
//! - Type-specific fields live behind [`TransactionBody`]; this module only
//!   knows a body's kind and encoded payload.
//! - Setter misuse is reported as an error, never silently ignored.
//! - A non-`Ok` precheck is returned as data.

pub mod builder;
pub mod signing;
pub mod types;

pub use builder::Transaction;
pub use types::{RawBody, TransactionBody, TransactionResponse, TransactionState};
