//! The transaction builder.
//!
//! A [`Transaction`] is built by setting fields on a mutable value, then
//! signed (see [`super::signing`]) and finally executed. Every field that
//! goes into the signed bytes is locked once the first signature exists, and
//! nothing at all can change after execution.

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::types::{RawBody, TransactionBody, TransactionResponse, TransactionState};
use crate::client::Client;
use crate::codec;
use crate::config::MAX_MEMO_BYTES;
use crate::crypto::{PublicKey, SecretKey, Signature};
use crate::error::{Result, SdkError};
use crate::identity::{AccountId, TransactionId};

/// A transaction under construction, signed, or sent.
///
/// # Canonical Byte Format
///
/// [`Transaction::signable_bytes`] is what every signer signs:
///
/// ```text
/// TransactionId            AccountId (3 × i64) | i64 seconds | i32 nanos
/// node                     AccountId (3 × i64)
/// fee                      u64
/// valid duration           u64 seconds
/// generate record          u8 (0 or 1)
/// memo                     u8 present | u32 len | UTF-8
/// body kind                u16
/// body payload             u32 len | bytes
/// ```
///
/// All integers are little-endian.
pub struct Transaction<B = RawBody> {
    client: Client,
    pub(super) operator: Option<AccountId>,
    pub(super) node: Option<AccountId>,
    memo: Option<String>,
    fee: u64,
    valid_duration: Duration,
    generate_record: bool,
    pub(super) transaction_id: Option<TransactionId>,
    body: B,
    pub(super) signatures: Vec<(PublicKey, Signature)>,
    sent: bool,
}

impl<B: TransactionBody> Transaction<B> {
    /// Creates a transaction around `body` with defaults from `client`'s
    /// config (operator, node, fee, valid duration).
    pub fn new(client: &Client, body: B) -> Self {
        let config = client.config();
        Self {
            client: client.clone(),
            operator: config.operator,
            node: config.node,
            memo: None,
            fee: config.transaction_fee,
            valid_duration: config.valid_duration(),
            generate_record: false,
            transaction_id: None,
            body,
            signatures: Vec::new(),
            sent: false,
        }
    }

    // ----- State -----

    /// Current lifecycle state.
    pub fn state(&self) -> TransactionState {
        if self.sent {
            TransactionState::Sent
        } else if !self.signatures.is_empty() {
            TransactionState::Signed
        } else if self.operator.is_some() && self.node.is_some() {
            TransactionState::ReadyToSign
        } else {
            TransactionState::Draft
        }
    }

    /// Fails unless signed fields may still change.
    pub(super) fn ensure_mutable(&self) -> Result<()> {
        if self.sent {
            return Err(SdkError::TransactionAlreadySent);
        }
        if !self.signatures.is_empty() {
            return Err(SdkError::TransactionFrozen);
        }
        Ok(())
    }

    /// Fails if a pinned transaction id names a payer other than the operator.
    pub(super) fn check_payer(
        operator: Option<AccountId>,
        id: Option<TransactionId>,
    ) -> Result<()> {
        match (operator, id) {
            (Some(operator), Some(id)) if id.account_id != operator => {
                Err(SdkError::PayerMismatch {
                    operator,
                    payer: id.account_id,
                })
            }
            _ => Ok(()),
        }
    }

    // ----- Setters -----

    /// Sets the paying account. Must match the account of a pinned
    /// transaction id.
    pub fn set_operator(&mut self, operator: AccountId) -> Result<&mut Self> {
        self.ensure_mutable()?;
        Self::check_payer(Some(operator), self.transaction_id)?;
        self.operator = Some(operator);
        Ok(self)
    }

    /// Sets the node the transaction is addressed to.
    pub fn set_node(&mut self, node: AccountId) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.node = Some(node);
        Ok(self)
    }

    /// Attaches a memo of at most [`MAX_MEMO_BYTES`] UTF-8 bytes.
    pub fn set_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self> {
        self.ensure_mutable()?;
        let memo = memo.into();
        if memo.len() > MAX_MEMO_BYTES {
            return Err(SdkError::MemoTooLong {
                len: memo.len(),
                max: MAX_MEMO_BYTES,
            });
        }
        self.memo = Some(memo);
        Ok(self)
    }

    /// Sets the maximum fee, in tinybars.
    pub fn set_fee(&mut self, fee: u64) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.fee = fee;
        Ok(self)
    }

    /// Sets how long after its valid start the transaction may be processed.
    /// Sub-second parts are dropped.
    pub fn set_valid_duration(&mut self, duration: Duration) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.valid_duration = Duration::from_secs(duration.as_secs());
        Ok(self)
    }

    /// Asks the network to keep a record of this transaction. A receipt is
    /// always kept; the record is optional.
    pub fn set_generate_record(&mut self, generate: bool) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.generate_record = generate;
        Ok(self)
    }

    /// Pins the transaction id instead of generating one at first signature.
    ///
    /// The id's account is the payer, so it must match the operator when one
    /// is set ([`SdkError::PayerMismatch`]).
    pub fn set_transaction_id(&mut self, id: TransactionId) -> Result<&mut Self> {
        self.ensure_mutable()?;
        Self::check_payer(self.operator, Some(id))?;
        self.transaction_id = Some(id);
        Ok(self)
    }

    // ----- Accessors -----

    pub fn operator(&self) -> Option<AccountId> {
        self.operator
    }

    pub fn node(&self) -> Option<AccountId> {
        self.node
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn valid_duration(&self) -> Duration {
        self.valid_duration
    }

    pub fn generate_record(&self) -> bool {
        self.generate_record
    }

    /// The transaction id, once set explicitly or fixed by the first signature.
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// `(public key, signature)` pairs in signing order.
    pub fn signatures(&self) -> &[(PublicKey, Signature)] {
        &self.signatures
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    // ----- Encoding -----

    /// The canonical bytes every signature covers.
    ///
    /// Needs a transaction id and a node. Before the first signature the id is
    /// usually absent; sign first or set it explicitly.
    pub fn signable_bytes(&self) -> Result<Bytes> {
        let id = self
            .transaction_id
            .ok_or(SdkError::IncompleteTransaction("transaction id"))?;
        let node = self.node.ok_or(SdkError::IncompleteTransaction("node"))?;

        let mut buf = BytesMut::with_capacity(128);
        codec::put_transaction_id(&mut buf, &id);
        codec::put_account_id(&mut buf, &node);
        buf.put_u64_le(self.fee);
        buf.put_u64_le(self.valid_duration.as_secs());
        buf.put_u8(u8::from(self.generate_record));
        codec::put_optional_str(&mut buf, self.memo.as_deref())?;
        buf.put_u16_le(self.body.kind());

        let mut payload = BytesMut::new();
        self.body.encode_payload(&mut payload);
        codec::put_bytes(&mut buf, &payload)?;

        Ok(buf.freeze())
    }

    /// The signed transaction as submitted:
    /// `u32 len | signable bytes | u32 count | count × (32-byte key, 64-byte signature)`.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let body = self.signable_bytes()?;
        let mut buf = BytesMut::with_capacity(body.len() + 8 + self.signatures.len() * 96);
        codec::put_bytes(&mut buf, &body)?;
        buf.put_u32_le(codec::length_prefix(self.signatures.len())?);
        for (public, signature) in &self.signatures {
            buf.put_slice(&public.to_bytes());
            buf.put_slice(&signature.to_bytes());
        }
        Ok(buf.freeze())
    }

    // ----- Execution -----

    /// Submits the signed transaction to the node.
    ///
    /// An unsigned transaction still paid by the client's operator is first
    /// signed with the configured operator key, if there is one.
    ///
    /// The transaction is `Sent` from the moment submission is attempted, even
    /// if the transport then fails: the node may have received it.
    ///
    /// Returns the node's precheck as data. Errors are local misuse,
    /// transport failures, or a response that does not decode.
    pub async fn execute(&mut self) -> Result<TransactionResponse> {
        if self.sent {
            return Err(SdkError::TransactionAlreadySent);
        }
        if self.operator.is_none() {
            return Err(SdkError::IncompleteTransaction("operator"));
        }
        if self.signatures.is_empty() {
            if let Some(key) = self.operator_key() {
                debug!("signing with the client operator key");
                self.sign(&key)?;
            }
        }
        let id = self
            .transaction_id
            .filter(|_| !self.signatures.is_empty())
            .ok_or(SdkError::IncompleteTransaction("signature"))?;
        let bytes = self.to_bytes()?;

        debug!(
            transaction_id = %id,
            node = ?self.node,
            signatures = self.signatures.len(),
            len = bytes.len(),
            "submitting transaction"
        );

        self.sent = true;
        let raw = self.client.execution().submit(bytes).await?;
        let response = TransactionResponse::from_bytes(&raw)?.expect_id(&id)?;

        if response.precheck.is_ok() {
            info!(transaction_id = %id, "transaction accepted by node");
        } else {
            warn!(
                transaction_id = %id,
                precheck = %response.precheck,
                "transaction rejected at precheck"
            );
        }
        Ok(response)
    }

    /// The client's operator key, while this transaction is paid by the
    /// client's operator.
    fn operator_key(&self) -> Option<SecretKey> {
        let config = self.client.config();
        config
            .operator_key
            .clone()
            .filter(|_| self.operator.is_some() && self.operator == config.operator)
    }
}

impl<B: TransactionBody> fmt::Debug for Transaction<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("state", &self.state())
            .field("transaction_id", &self.transaction_id)
            .field("operator", &self.operator)
            .field("node", &self.node)
            .field("kind", &self.body.kind())
            .field("signatures", &self.signatures.len())
            .finish_non_exhaustive()
    }
}
