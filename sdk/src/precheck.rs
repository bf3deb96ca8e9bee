//! Node precheck codes.
//!
//! A precheck is the node's immediate, pre-consensus verdict on a transaction
//! or query. `Ok` only means the node accepted the request for processing; the
//! transaction can still fail at consensus (see the receipt query).
//!
//! Decoding is strict: the wire byte must be one of the eight known values.
//! Anything else is a [`SdkError::ProtocolViolation`], never a silent `Ok`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SdkError;

/// Immediate-validation outcome reported by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PrecheckCode {
    /// The request passed precheck.
    Ok = 0,
    /// The transaction had incorrect syntax or other errors.
    InvalidTransaction = 1,
    /// The operator or node account is not a valid account.
    InvalidAccount = 2,
    /// The fee is too low for this kind of transaction.
    InsufficientFee = 3,
    /// The paying account cannot cover the fee.
    InsufficientBalance = 4,
    /// The transaction id was already seen in the receipt period.
    Duplicate = 5,
    /// The node is throttling requests.
    Busy = 6,
    /// The node does not support this request.
    NotSupported = 7,
}

impl PrecheckCode {
    /// Returns `true` for [`PrecheckCode::Ok`].
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Whether resubmitting the same request later can succeed.
    ///
    /// Only `Busy` qualifies. The SDK never retries on its own; this exists so
    /// callers can write their own policy.
    pub fn is_retryable(self) -> bool {
        self == Self::Busy
    }

    /// The wire representation.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PrecheckCode {
    type Error = SdkError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Ok,
            1 => Self::InvalidTransaction,
            2 => Self::InvalidAccount,
            3 => Self::InsufficientFee,
            4 => Self::InsufficientBalance,
            5 => Self::Duplicate,
            6 => Self::Busy,
            7 => Self::NotSupported,
            other => {
                return Err(SdkError::violation(format!(
                    "unknown precheck code {other}"
                )))
            }
        })
    }
}

impl From<PrecheckCode> for u8 {
    fn from(code: PrecheckCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for PrecheckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::InvalidTransaction => "INVALID_TRANSACTION",
            Self::InvalidAccount => "INVALID_ACCOUNT",
            Self::InsufficientFee => "INSUFFICIENT_FEE",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::Duplicate => "DUPLICATE",
            Self::Busy => "BUSY",
            Self::NotSupported => "NOT_SUPPORTED",
        };
        f.write_str(name)
    }
}
