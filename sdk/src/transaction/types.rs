//! Value types around a transaction: its body slot, its lifecycle state,
//! and what the node answers on submission.

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{self, Reader};
use crate::error::{Result, SdkError};
use crate::identity::TransactionId;
use crate::precheck::PrecheckCode;

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// The type-specific part of a transaction.
///
/// The core signs and ships a body without looking inside it. A body only has
/// to say which kind of transaction it is and how its fields encode; both end
/// up in the signed bytes.
pub trait TransactionBody: Send + Sync {
    /// Numeric transaction kind understood by the node.
    fn kind(&self) -> u16;

    /// Appends the encoded payload to `buf`.
    fn encode_payload(&self, buf: &mut BytesMut);
}

/// A body given as an already-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBody {
    pub kind: u16,
    pub payload: Vec<u8>,
}

impl RawBody {
    pub fn new(kind: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }
}

impl TransactionBody for RawBody {
    fn kind(&self) -> u16 {
        self.kind
    }

    fn encode_payload(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.payload);
    }
}

// ---------------------------------------------------------------------------
// TransactionState
// ---------------------------------------------------------------------------

/// Where a transaction is in its lifecycle.
///
/// ```text
/// Draft ──(operator + node)──▶ ReadyToSign ──(sign)──▶ Signed ──(execute)──▶ Sent
/// ```
///
/// `Sent` is terminal. The state is derived from the transaction's fields, so
/// it can never disagree with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionState {
    /// Operator or node still missing.
    Draft,
    /// Operator and node set, no signatures yet.
    ReadyToSign,
    /// At least one signature attached; signed fields are frozen.
    Signed,
    /// Submitted. Nothing can change any more.
    Sent,
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::ReadyToSign => write!(f, "ReadyToSign"),
            Self::Signed => write!(f, "Signed"),
            Self::Sent => write!(f, "Sent"),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionResponse
// ---------------------------------------------------------------------------

/// The node's immediate answer to a submitted transaction.
///
/// A non-`Ok` precheck is a normal outcome, not an error. Acceptance says
/// nothing about consensus; fetch a receipt for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub precheck: PrecheckCode,
}

impl TransactionResponse {
    /// Encodes as `TransactionId | u8 precheck`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(37);
        codec::put_transaction_id(&mut buf, &self.id);
        buf.put_u8(self.precheck.as_u8());
        buf.to_vec()
    }

    /// Decodes a response received from a node.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let id = reader.transaction_id("transaction response id")?;
        let precheck = PrecheckCode::try_from(reader.u8("transaction response precheck")?)?;
        reader.finish("transaction response")?;
        Ok(Self { id, precheck })
    }

    /// Fails with a protocol violation if the node answered for a different
    /// transaction.
    pub(crate) fn expect_id(self, submitted: &TransactionId) -> Result<Self> {
        if self.id != *submitted {
            return Err(SdkError::violation(format!(
                "response is for transaction {} but {} was submitted",
                self.id, submitted
            )));
        }
        Ok(self)
    }
}
