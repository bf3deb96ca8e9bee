// Copyright (c) 2026 Hedera SDK Contributors. Apache-2.0 License.
// See LICENSE for details.

//! # Hedera SDK — Core Library
//!
//! Client-side building blocks for a Hedera-style ledger: identifiers,
//! Ed25519 key material, a transaction builder with cumulative signing, and
//! a query engine. Networking is someone else's job; the core talks to nodes
//! only through the [`ExecutionClient`] trait.
//!
//! ## Architecture
//!
//! Modules, leaves first:
//!
//! - **identity** — `AccountId`, `Timestamp`, `TransactionId`, the `Clock`.
//! - **crypto** — Ed25519 secret/public keys and signatures, DER string forms.
//! - **precheck** — the node's immediate verdict codes.
//! - **codec** — little-endian wire encoding.
//! - **config** — protocol constants and `ClientConfig`.
//! - **client** — the execution collaborator and the shared `Client`.
//! - **transaction** — build, sign, execute.
//! - **query** — balance and receipt queries.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hedera_sdk::{AccountId, Client, ClientConfig, ExecutionClient, RawBody, SecretKey};
//!
//! # async fn run(transport: Arc<dyn ExecutionClient>) -> hedera_sdk::Result<()> {
//! let config = ClientConfig::default()
//!     .with_operator(AccountId::new(0, 0, 1001))
//!     .with_node(AccountId::new(0, 0, 3));
//! let client = Client::new(transport, config);
//!
//! let key = SecretKey::generate();
//! let mut tx = client.transaction(RawBody::new(12, b"payload".to_vec()));
//! tx.set_memo("hello")?.sign(&key)?;
//! let response = tx.execute().await?;
//!
//! let receipt = client.get_transaction_receipt(response.id).answer().await?;
//! println!("{}", receipt.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Ground rules
//!
//! 1. Local misuse fails before any bytes leave the process.
//! 2. A node's precheck rejection is data, not an error.
//! 3. Nothing retries behind your back.
//! 4. Key material never appears in `Debug` output or logs.

pub mod client;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod precheck;
pub mod query;
pub mod transaction;

pub use client::{Client, Dialer, ExecutionClient};
pub use config::ClientConfig;
pub use crypto::{PublicKey, SecretKey, Signature};
pub use error::{Result, SdkError};
pub use identity::{AccountId, Clock, FixedClock, SystemClock, Timestamp, TransactionId};
pub use precheck::PrecheckCode;
pub use query::{
    AccountBalance, EntityKind, Query, QueryIntent, QueryResponse, Receipt, ReceiptEntity,
    ReceiptStatus, ResponseKind, TransactionReceipt,
};
pub use transaction::{
    RawBody, Transaction, TransactionBody, TransactionResponse, TransactionState,
};
