//! # Query Engine
//!
//! Read-only requests to a node. A [`Query`] wraps one [`QueryIntent`] (what
//! is being asked) and can be sent exactly once.
//!
//! ## Wire shapes
//!
//! ```text
//! request   u8 intent tag | u8 response kind | option<bytes> payment | intent payload
//! response  u8 precheck | u8 response kind | u64 cost | u8 answer tag | answer
//! ```
//!
//! The payment is an encoded signed transaction paying the node for the
//! answer. The response kind must echo the one requested. An answer tag of
//! `0` means the node sent no answer (cost-only responses, failed
//! prechecks). Any other tag must match the intent that was asked.
//!
//! ## Intents
//!
//! - [`AccountBalance`]: account balance in tinybars.
//! - [`TransactionReceipt`]: consensus outcome of a transaction.

pub mod account_balance;
pub mod transaction_receipt;

pub use account_balance::AccountBalance;
pub use transaction_receipt::{
    EntityKind, Receipt, ReceiptEntity, ReceiptStatus, TransactionReceipt,
};

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::client::Client;
use crate::codec::{self, Reader};
use crate::error::{Result, SdkError};
use crate::precheck::PrecheckCode;
use crate::transaction::{Transaction, TransactionBody};

/// Wire value reserved for answer-with-state-proof.
const RESERVED_ANSWER_STATE_PROOF: u8 = 1;

// ---------------------------------------------------------------------------
// ResponseKind
// ---------------------------------------------------------------------------

/// What the node should send back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResponseKind {
    /// The answer only.
    AnswerOnly = 0,
    /// The cost of answering, without the answer.
    CostAnswer = 2,
    /// The cost of answering with a state proof. Not supported by this SDK.
    CostAnswerStateProof = 3,
}

impl ResponseKind {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Kinds whose responses carry a state proof.
    pub fn has_state_proof(self) -> bool {
        matches!(self, Self::CostAnswerStateProof)
    }
}

impl TryFrom<u8> for ResponseKind {
    type Error = SdkError;

    /// `1` is reserved and reported as [`SdkError::UnsupportedResponseKind`];
    /// values above `3` are not part of the protocol at all.
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::AnswerOnly),
            2 => Ok(Self::CostAnswer),
            3 => Ok(Self::CostAnswerStateProof),
            RESERVED_ANSWER_STATE_PROOF => Err(SdkError::UnsupportedResponseKind(value)),
            other => Err(SdkError::violation(format!("unknown response kind {other}"))),
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnswerOnly => write!(f, "ANSWER_ONLY"),
            Self::CostAnswer => write!(f, "COST_ANSWER"),
            Self::CostAnswerStateProof => write!(f, "COST_ANSWER_STATE_PROOF"),
        }
    }
}

// ---------------------------------------------------------------------------
// QueryIntent
// ---------------------------------------------------------------------------

/// One kind of question a node can answer.
pub trait QueryIntent: Send + Sync {
    /// Tag identifying the intent on the wire. Never `0`.
    const TAG: u8;

    /// Decoded answer type.
    type Answer;

    /// Appends the intent payload to `buf`.
    fn build_request(&self, buf: &mut BytesMut);

    /// Decodes the answer body that follows a matching answer tag.
    fn decode_answer(reader: &mut Reader<'_>) -> Result<Self::Answer>;
}

// ---------------------------------------------------------------------------
// QueryResponse
// ---------------------------------------------------------------------------

/// A decoded node response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse<A> {
    pub precheck: PrecheckCode,
    pub response_kind: ResponseKind,
    /// Cost of answering, in tinybars.
    pub cost: u64,
    pub answer: Option<A>,
}

impl<A> QueryResponse<A> {
    /// Trades the response for its answer.
    ///
    /// A non-`Ok` precheck becomes [`SdkError::Precheck`]; an `Ok` response
    /// without an answer is a protocol violation.
    pub fn into_answer(self) -> Result<A> {
        if !self.precheck.is_ok() {
            return Err(SdkError::Precheck(self.precheck));
        }
        self.answer
            .ok_or_else(|| SdkError::violation("response carries no answer"))
    }

    /// Decodes a response to a request for `requested`.
    ///
    /// An echoed state-proof kind is [`SdkError::UnsupportedResponseKind`];
    /// any other kind than the requested one is a protocol violation.
    fn decode<Q: QueryIntent<Answer = A>>(bytes: &[u8], requested: ResponseKind) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let precheck = PrecheckCode::try_from(reader.u8("query precheck")?)?;
        let kind_byte = reader.u8("query response kind")?;
        let response_kind = ResponseKind::try_from(kind_byte).map_err(|_| {
            SdkError::violation(format!("node answered with response kind {kind_byte}"))
        })?;
        if response_kind.has_state_proof() {
            return Err(SdkError::UnsupportedResponseKind(kind_byte));
        }
        if response_kind != requested {
            return Err(SdkError::violation(format!(
                "asked for {requested}, node answered {response_kind}"
            )));
        }
        let cost = reader.u64("query cost")?;

        let answer = match reader.u8("answer tag")? {
            0 => None,
            tag if tag == Q::TAG => Some(Q::decode_answer(&mut reader)?),
            tag => {
                return Err(SdkError::violation(format!(
                    "answer tag {tag} does not match query tag {}",
                    Q::TAG
                )))
            }
        };
        reader.finish("query response")?;

        Ok(Self {
            precheck,
            response_kind,
            cost,
            answer,
        })
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A single-use query.
pub struct Query<Q> {
    client: Client,
    intent: Q,
    payment: Option<Bytes>,
    sent: bool,
}

impl<Q: QueryIntent> Query<Q> {
    pub fn new(client: &Client, intent: Q) -> Self {
        Self {
            client: client.clone(),
            intent,
            payment: None,
            sent: false,
        }
    }

    pub fn intent(&self) -> &Q {
        &self.intent
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Attaches a signed transaction that pays the node for answering.
    ///
    /// The transaction is encoded as it stands; it must carry at least one
    /// signature.
    pub fn set_payment<B: TransactionBody>(
        &mut self,
        payment: &Transaction<B>,
    ) -> Result<&mut Self> {
        if self.sent {
            return Err(SdkError::QueryAlreadySent);
        }
        if payment.signatures().is_empty() {
            return Err(SdkError::IncompleteTransaction("payment signature"));
        }
        self.payment = Some(payment.to_bytes()?);
        Ok(self)
    }

    /// The encoded payment transaction, if one is attached.
    pub fn payment(&self) -> Option<&[u8]> {
        self.payment.as_deref()
    }

    /// Encodes the request for `kind`.
    pub fn to_bytes(&self, kind: ResponseKind) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(64);
        buf.put_u8(Q::TAG);
        buf.put_u8(kind.as_u8());
        codec::put_optional_bytes(&mut buf, self.payment.as_deref())?;
        self.intent.build_request(&mut buf);
        Ok(buf)
    }

    /// Sends the query and decodes the response.
    ///
    /// State-proof kinds are rejected before anything is sent, and do not use
    /// up the query. A non-`Ok` precheck comes back as data.
    pub async fn send(&mut self, kind: ResponseKind) -> Result<QueryResponse<Q::Answer>> {
        if self.sent {
            return Err(SdkError::QueryAlreadySent);
        }
        if kind.has_state_proof() {
            return Err(SdkError::UnsupportedResponseKind(kind.as_u8()));
        }

        let request = self.to_bytes(kind)?.freeze();
        debug!(
            tag = Q::TAG,
            kind = %kind,
            paid = self.payment.is_some(),
            len = request.len(),
            "sending query"
        );

        self.sent = true;
        let raw = self.client.execution().query(request).await?;
        let response = QueryResponse::decode::<Q>(&raw, kind)?;

        if response.precheck.is_ok() {
            info!(
                tag = Q::TAG,
                cost = response.cost,
                answered = response.answer.is_some(),
                "query answered"
            );
        } else {
            warn!(tag = Q::TAG, precheck = %response.precheck, "query rejected at precheck");
        }
        Ok(response)
    }

    /// [`send`](Self::send) with a response kind given as its wire byte.
    pub async fn send_raw(&mut self, kind: u8) -> Result<QueryResponse<Q::Answer>> {
        if self.sent {
            return Err(SdkError::QueryAlreadySent);
        }
        let kind = ResponseKind::try_from(kind)?;
        self.send(kind).await
    }

    /// Asks only for the cost of answering.
    pub async fn cost(mut self) -> Result<u64> {
        let response = self.send(ResponseKind::CostAnswer).await?;
        if !response.precheck.is_ok() {
            return Err(SdkError::Precheck(response.precheck));
        }
        Ok(response.cost)
    }

    /// Asks for the answer; a non-`Ok` precheck becomes an error.
    pub async fn answer(mut self) -> Result<Q::Answer> {
        self.send(ResponseKind::AnswerOnly).await?.into_answer()
    }
}

impl<Q: fmt::Debug> fmt::Debug for Query<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("intent", &self.intent)
            .field("paid", &self.payment.is_some())
            .field("sent", &self.sent)
            .finish_non_exhaustive()
    }
}
