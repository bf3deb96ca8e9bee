//! Error types for the SDK core.
//!
//! Every fallible operation returns an [`SdkError`]. Local misuse (bad input,
//! state machine violations) is reported before anything touches the network.
//! Node-side precheck rejections are *not* errors: they come back as data in
//! [`TransactionResponse`](crate::transaction::TransactionResponse) and
//! [`QueryResponse`](crate::query::QueryResponse). The only exception is the
//! opt-in [`QueryResponse::into_answer`](crate::query::QueryResponse::into_answer).

use thiserror::Error;

use crate::identity::AccountId;
use crate::precheck::PrecheckCode;

/// Errors surfaced by the SDK core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// An identifier string did not match `shard.realm.account` (or the
    /// transaction id / timestamp forms built on top of it).
    #[error("malformed identifier {input:?}: expected {expected}")]
    MalformedIdentifier {
        /// The rejected input.
        input: String,
        /// The shape we were looking for.
        expected: &'static str,
    },

    /// Key material could not be decoded. The message never contains key bytes.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(&'static str),

    /// The transaction is missing a field required for the requested step.
    #[error("incomplete transaction: missing {0}")]
    IncompleteTransaction(&'static str),

    /// The transaction was already submitted.
    #[error("transaction has already been sent")]
    TransactionAlreadySent,

    /// The transaction carries signatures, so its signed fields are locked.
    #[error("transaction is frozen by an existing signature")]
    TransactionFrozen,

    /// The same key tried to sign the transaction twice.
    #[error("transaction is already signed by public key {0}")]
    DuplicateSignature(String),

    /// The memo exceeds the network limit.
    #[error("memo is {len} bytes, maximum is {max}")]
    MemoTooLong {
        /// Length of the rejected memo in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// A length-prefixed field is longer than a `u32` prefix can describe.
    #[error("payload of {0} bytes exceeds the u32 length prefix")]
    PayloadTooLarge(usize),

    /// A pinned transaction id names a payer other than the operator.
    #[error("transaction id payer {payer} does not match operator {operator}")]
    PayerMismatch {
        /// The transaction's operator.
        operator: AccountId,
        /// The account in the transaction id.
        payer: AccountId,
    },

    /// The query was already sent.
    #[error("query has already been sent")]
    QueryAlreadySent,

    /// The response kind is reserved or needs state-proof decoding, which the
    /// core does not implement.
    #[error("unsupported response kind: {0}")]
    UnsupportedResponseKind(u8),

    /// The node sent bytes that do not follow the wire format.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// A precheck rejection, raised only by helpers that trade the response
    /// for its answer.
    #[error("precheck failed with status {0}")]
    Precheck(PrecheckCode),

    /// The execution client failed while moving bytes to or from the node.
    #[error("transport error: {0}")]
    Transport(String),

    /// The execution client could not open a connection to the node.
    #[error("connection error: {0}")]
    Connection(String),

    /// Client configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SdkError {
    pub(crate) fn malformed(input: &str, expected: &'static str) -> Self {
        Self::MalformedIdentifier {
            input: input.to_string(),
            expected,
        }
    }

    pub(crate) fn violation(reason: impl Into<String>) -> Self {
        Self::ProtocolViolation(reason.into())
    }

    /// Wraps a collaborator transport failure.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Wraps a collaborator connection failure.
    pub fn connection(err: impl std::fmt::Display) -> Self {
        Self::Connection(err.to_string())
    }

    /// Returns `true` for errors caused by the caller (bad input or misuse of
    /// a builder). These will fail the same way every time.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            Self::ProtocolViolation(_)
                | Self::Precheck(_)
                | Self::Transport(_)
                | Self::Connection(_)
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SdkError>;
