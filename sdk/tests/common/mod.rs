//! Shared utilities for integration testing: an in-memory node that speaks
//! the SDK wire format and a dialer that hands it out.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use parking_lot::Mutex;

use hedera_sdk::codec::{self, Reader};
use hedera_sdk::{
    AccountId, Client, ClientConfig, Dialer, ExecutionClient, FixedClock, PrecheckCode,
    PublicKey, Result, SdkError, Signature, Timestamp, TransactionId, TransactionResponse,
};

pub const OPERATOR: AccountId = AccountId::new(0, 0, 1001);
pub const NODE: AccountId = AccountId::new(0, 0, 3);
pub const START: Timestamp = Timestamp::new(1_700_000_000, 0);
pub const QUERY_COST: u64 = 25;

/// What the node learned from one submitted transaction.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub id: TransactionId,
    pub node: AccountId,
    pub fee: u64,
    pub generate_record: bool,
    pub memo: Option<String>,
    pub kind: u16,
    pub payload: Vec<u8>,
    pub signers: Vec<PublicKey>,
}

#[derive(Default)]
struct NodeState {
    balances: HashMap<AccountId, u64>,
    seen: HashSet<TransactionId>,
    submitted: Vec<Submitted>,
    queries: usize,
    paid_queries: usize,
    busy: bool,
    down: bool,
}

/// An in-memory node.
///
/// Verifies signatures on submission, rejects replays, answers balance and
/// receipt queries. Every accepted transaction gets a `SUCCESS` receipt.
#[derive(Default)]
pub struct MockNode {
    state: Mutex<NodeState>,
    min_fee: u64,
}

impl MockNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_min_fee(min_fee: u64) -> Arc<Self> {
        Arc::new(Self {
            min_fee,
            ..Self::default()
        })
    }

    pub fn set_balance(&self, account: AccountId, tinybars: u64) {
        self.state.lock().balances.insert(account, tinybars);
    }

    /// Answer every request with `BUSY`.
    pub fn set_busy(&self, busy: bool) {
        self.state.lock().busy = busy;
    }

    /// Fail every request at the transport level.
    pub fn set_down(&self, down: bool) {
        self.state.lock().down = down;
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.state.lock().submitted.clone()
    }

    pub fn query_count(&self) -> usize {
        self.state.lock().queries
    }

    /// Queries that carried a payment with valid signatures.
    pub fn paid_query_count(&self) -> usize {
        self.state.lock().paid_queries
    }

    /// Splits a signed transaction into its body and verified signers.
    /// `None` if any signature fails.
    fn open_signed(bytes: &[u8]) -> Result<(&[u8], Option<Vec<PublicKey>>)> {
        let mut reader = Reader::new(bytes);
        let body = reader.bytes("body")?;
        let count = reader.u32("signature count")?;
        let mut signers = Vec::new();
        let mut valid = count > 0;
        for _ in 0..count {
            let pk = PublicKey::from_bytes(&reader.array::<32>("public key")?)?;
            let sig = Signature::from_bytes(&reader.array::<64>("signature")?);
            valid &= pk.verify(body, &sig);
            signers.push(pk);
        }
        reader.finish("signed transaction")?;
        Ok((body, valid.then_some(signers)))
    }

    fn handle_submit(&self, bytes: &[u8]) -> Result<(TransactionId, PrecheckCode)> {
        let (body, signers) = Self::open_signed(bytes)?;

        let mut body_reader = Reader::new(body);
        let id = body_reader.transaction_id("id")?;
        let node = body_reader.account_id("node")?;
        let fee = body_reader.u64("fee")?;
        let _valid_duration = body_reader.u64("valid duration")?;
        let generate_record = body_reader.u8("generate record")? == 1;
        let memo = match body_reader.u8("memo flag")? {
            0 => None,
            _ => Some(String::from_utf8_lossy(body_reader.bytes("memo")?).into_owned()),
        };
        let kind = u16::from_le_bytes(body_reader.array::<2>("kind")?);
        let payload = body_reader.bytes("payload")?.to_vec();
        body_reader.finish("body")?;

        let mut state = self.state.lock();
        if state.busy {
            return Ok((id, PrecheckCode::Busy));
        }
        let Some(signers) = signers else {
            return Ok((id, PrecheckCode::InvalidTransaction));
        };
        if node != NODE {
            return Ok((id, PrecheckCode::InvalidAccount));
        }
        if fee < self.min_fee {
            return Ok((id, PrecheckCode::InsufficientFee));
        }
        if !state.seen.insert(id) {
            return Ok((id, PrecheckCode::Duplicate));
        }

        state.submitted.push(Submitted {
            id,
            node,
            fee,
            generate_record,
            memo,
            kind,
            payload,
            signers,
        });
        Ok((id, PrecheckCode::Ok))
    }

    fn handle_query(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut reader = Reader::new(bytes);
        let tag = reader.u8("tag")?;
        let kind = reader.u8("kind")?;
        let payment = match reader.u8("payment flag")? {
            0 => None,
            _ => Some(reader.bytes("payment")?),
        };

        let mut state = self.state.lock();
        state.queries += 1;
        if let Some(payment) = payment {
            if let (_, Some(_)) = Self::open_signed(payment)? {
                state.paid_queries += 1;
            }
        }

        let mut out = BytesMut::new();
        let header = |out: &mut BytesMut, precheck: PrecheckCode| {
            out.put_u8(precheck.as_u8());
            out.put_u8(kind);
            out.put_u64_le(QUERY_COST);
        };

        if state.busy {
            header(&mut out, PrecheckCode::Busy);
            out.put_u8(0);
            return Ok(out.to_vec());
        }

        match tag {
            1 => {
                let account = reader.account_id("account")?;
                match state.balances.get(&account) {
                    None => {
                        header(&mut out, PrecheckCode::InvalidAccount);
                        out.put_u8(0);
                    }
                    Some(_) if kind == 2 => {
                        header(&mut out, PrecheckCode::Ok);
                        out.put_u8(0);
                    }
                    Some(balance) => {
                        header(&mut out, PrecheckCode::Ok);
                        out.put_u8(1);
                        out.put_u64_le(*balance);
                    }
                }
            }
            2 => {
                let id = reader.transaction_id("transaction id")?;
                header(&mut out, PrecheckCode::Ok);
                if kind == 2 {
                    out.put_u8(0);
                } else {
                    out.put_u8(2);
                    if state.seen.contains(&id) {
                        // SUCCESS, created account 0.0.(1000 + n)
                        out.put_u8(1);
                        out.put_u8(1);
                        let created = AccountId::new(0, 0, 1000 + state.seen.len() as u64);
                        codec::put_account_id(&mut out, &created);
                    } else {
                        out.put_u8(0);
                        out.put_u8(0);
                    }
                }
            }
            _ => {
                header(&mut out, PrecheckCode::NotSupported);
                out.put_u8(0);
            }
        }
        Ok(out.to_vec())
    }
}

#[async_trait]
impl ExecutionClient for MockNode {
    async fn submit(&self, transaction: Bytes) -> Result<Bytes> {
        if self.state.lock().down {
            return Err(SdkError::transport("node unreachable"));
        }
        let (id, precheck) = self
            .handle_submit(&transaction)
            .map_err(|e| SdkError::transport(format!("node could not parse transaction: {e}")))?;
        Ok(Bytes::from(TransactionResponse { id, precheck }.to_bytes()))
    }

    async fn query(&self, request: Bytes) -> Result<Bytes> {
        if self.state.lock().down {
            return Err(SdkError::transport("node unreachable"));
        }
        self.handle_query(&request)
            .map(Bytes::from)
            .map_err(|e| SdkError::transport(format!("node could not parse query: {e}")))
    }
}

/// Hands out one shared node for a known address.
pub struct MockDialer {
    pub address: String,
    pub node: Arc<MockNode>,
}

#[async_trait]
impl Dialer for MockDialer {
    async fn dial(&self, address: &str) -> Result<Arc<dyn ExecutionClient>> {
        if address != self.address {
            return Err(SdkError::connection(format!("{address}: no route to host")));
        }
        Ok(self.node.clone())
    }
}

/// A client for `node` with operator/node pre-set and a pinned clock.
pub fn client_for(node: Arc<MockNode>) -> (Client, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(START));
    let config = ClientConfig::default()
        .with_operator(OPERATOR)
        .with_node(NODE);
    let client = Client::new(node, config).with_clock(clock.clone());
    (client, clock)
}
