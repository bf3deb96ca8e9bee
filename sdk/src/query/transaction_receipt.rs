//! Transaction receipt query.
//!
//! A receipt is the consensus outcome of a transaction: a status and, for
//! transactions that create something, the id of what was created. Only
//! account ids are modelled. Contract and file ids are recognised on the
//! wire, consumed, and reported as [`ReceiptEntity::Unsupported`].

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::QueryIntent;
use crate::codec::{self, Reader};
use crate::error::{Result, SdkError};
use crate::identity::{AccountId, TransactionId};

// ---------------------------------------------------------------------------
// ReceiptStatus
// ---------------------------------------------------------------------------

/// Consensus status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReceiptStatus {
    /// Not yet reached consensus, or already expired.
    Unknown = 0,
    Success = 1,
    /// Failed because it was invalid.
    FailInvalid = 2,
    /// The fee was insufficient.
    FailFee = 3,
    /// The payer could not cover the transfer.
    FailBalance = 4,
}

impl TryFrom<u8> for ReceiptStatus {
    type Error = SdkError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Unknown,
            1 => Self::Success,
            2 => Self::FailInvalid,
            3 => Self::FailFee,
            4 => Self::FailBalance,
            other => return Err(SdkError::violation(format!("unknown receipt status {other}"))),
        })
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Success => write!(f, "SUCCESS"),
            Self::FailInvalid => write!(f, "FAIL_INVALID"),
            Self::FailFee => write!(f, "FAIL_FEE"),
            Self::FailBalance => write!(f, "FAIL_BALANCE"),
        }
    }
}

// ---------------------------------------------------------------------------
// ReceiptEntity
// ---------------------------------------------------------------------------

/// Entity kinds a receipt can name that this SDK does not model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Contract,
    File,
}

/// The entity created by a transaction, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptEntity {
    Account(AccountId),
    /// A created entity of a kind not modelled here.
    Unsupported(EntityKind),
}

/// Decoded receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub status: ReceiptStatus,
    pub entity: Option<ReceiptEntity>,
}

impl Receipt {
    /// The created account, if the receipt names one.
    pub fn account_id(&self) -> Option<AccountId> {
        match self.entity {
            Some(ReceiptEntity::Account(id)) => Some(id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionReceipt intent
// ---------------------------------------------------------------------------

const ENTITY_NONE: u8 = 0;
const ENTITY_ACCOUNT: u8 = 1;
const ENTITY_CONTRACT: u8 = 2;
const ENTITY_FILE: u8 = 3;

/// Asks for the receipt of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_id: TransactionId,
}

impl TransactionReceipt {
    pub fn new(transaction_id: TransactionId) -> Self {
        Self { transaction_id }
    }
}

impl QueryIntent for TransactionReceipt {
    const TAG: u8 = 2;

    type Answer = Receipt;

    fn build_request(&self, buf: &mut BytesMut) {
        codec::put_transaction_id(buf, &self.transaction_id);
    }

    fn decode_answer(reader: &mut Reader<'_>) -> Result<Receipt> {
        let status = ReceiptStatus::try_from(reader.u8("receipt status")?)?;
        let entity = match reader.u8("receipt entity tag")? {
            ENTITY_NONE => None,
            ENTITY_ACCOUNT => Some(ReceiptEntity::Account(reader.account_id("receipt account")?)),
            ENTITY_CONTRACT => {
                skip_entity_id(reader)?;
                Some(ReceiptEntity::Unsupported(EntityKind::Contract))
            }
            ENTITY_FILE => {
                skip_entity_id(reader)?;
                Some(ReceiptEntity::Unsupported(EntityKind::File))
            }
            other => {
                return Err(SdkError::violation(format!(
                    "unknown receipt entity tag {other}"
                )))
            }
        };
        Ok(Receipt { status, entity })
    }
}

fn skip_entity_id(reader: &mut Reader<'_>) -> Result<()> {
    reader.array::<24>("receipt entity id").map(|_| ())
}
