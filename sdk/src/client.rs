//! # Client & Execution Collaborator
//!
//! The SDK core never opens sockets. Everything that leaves the process goes
//! through an [`ExecutionClient`]: one call to submit a signed transaction,
//! one call to run a query, both taking and returning opaque bytes. A
//! [`Dialer`] turns a node address into such a client.
//!
//! [`Client`] bundles the collaborator with a [`ClientConfig`] and a
//! [`Clock`]. It is cheap to clone and read-only; every transaction and query
//! built from it holds its own clone.
//!
//! ```text
//! Client ──transaction(body)──▶ Transaction<B> ──execute──▶ ExecutionClient::submit
//!        ──get_*(...)─────────▶ Query<Q>       ──send─────▶ ExecutionClient::query
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::identity::{AccountId, Clock, SystemClock, TransactionId};
use crate::query::{AccountBalance, Query, TransactionReceipt};
use crate::transaction::{Transaction, TransactionBody};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Moves request bytes to a node and answer bytes back.
///
/// Implementations report failures with [`SdkError::Transport`](crate::SdkError::Transport)
/// (see [`SdkError::transport`](crate::SdkError::transport)). The SDK passes
/// those through untouched and never retries.
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// Submits an encoded signed transaction; returns the encoded response.
    async fn submit(&self, transaction: Bytes) -> Result<Bytes>;

    /// Runs an encoded query; returns the encoded response.
    async fn query(&self, request: Bytes) -> Result<Bytes>;

    /// Releases the connection. The default does nothing.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Opens execution clients.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Connects to `address`. Failures are
    /// [`SdkError::Connection`](crate::SdkError::Connection).
    async fn dial(&self, address: &str) -> Result<Arc<dyn ExecutionClient>>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Shared, read-only context for transactions and queries.
#[derive(Clone)]
pub struct Client {
    execution: Arc<dyn ExecutionClient>,
    config: Arc<ClientConfig>,
    clock: Arc<dyn Clock>,
}

impl Client {
    /// Wraps an execution client with the given defaults.
    pub fn new(execution: Arc<dyn ExecutionClient>, config: ClientConfig) -> Self {
        Self {
            execution,
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    /// Dials `address` and wraps the resulting execution client.
    pub async fn dial(dialer: &dyn Dialer, address: &str, config: ClientConfig) -> Result<Self> {
        debug!(address, "dialing node");
        let execution = dialer.dial(address).await?;
        Ok(Self::new(execution, config))
    }

    /// Replaces the clock used for new transaction ids.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Closes the underlying execution client.
    pub async fn close(&self) -> Result<()> {
        self.execution.close().await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn execution(&self) -> &dyn ExecutionClient {
        self.execution.as_ref()
    }

    /// Starts a transaction with `body`, pre-filled from the config.
    pub fn transaction<B: TransactionBody>(&self, body: B) -> Transaction<B> {
        Transaction::new(self, body)
    }

    /// Query for the balance of `account`, in tinybars.
    pub fn get_account_balance(&self, account: AccountId) -> Query<AccountBalance> {
        Query::new(self, AccountBalance::new(account))
    }

    /// Query for the receipt of transaction `id`.
    pub fn get_transaction_receipt(&self, id: TransactionId) -> Query<TransactionReceipt> {
        Query::new(self, TransactionReceipt::new(id))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-crate execution client that replays canned answers and records
    //! every request it sees.

    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    use crate::error::SdkError;

    #[derive(Default)]
    pub(crate) struct MockExecution {
        pub submitted: Mutex<Vec<Bytes>>,
        pub queried: Mutex<Vec<Bytes>>,
        pub answers: Mutex<VecDeque<Result<Bytes>>>,
    }

    impl MockExecution {
        pub(crate) fn answering(answers: impl IntoIterator<Item = Result<Vec<u8>>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(
                    answers
                        .into_iter()
                        .map(|a| a.map(Bytes::from))
                        .collect(),
                ),
                ..Default::default()
            })
        }

        fn next_answer(&self) -> Result<Bytes> {
            self.answers
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(SdkError::transport("no canned answer left")))
        }
    }

    #[async_trait]
    impl ExecutionClient for MockExecution {
        async fn submit(&self, transaction: Bytes) -> Result<Bytes> {
            self.submitted.lock().push(transaction);
            self.next_answer()
        }

        async fn query(&self, request: Bytes) -> Result<Bytes> {
            self.queried.lock().push(request);
            self.next_answer()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockExecution;
    use super::*;
    use crate::error::SdkError;
    use crate::identity::{FixedClock, Timestamp};
    use crate::transaction::RawBody;

    struct RefusingDialer;

    #[async_trait]
    impl Dialer for RefusingDialer {
        async fn dial(&self, address: &str) -> Result<Arc<dyn ExecutionClient>> {
            Err(SdkError::connection(format!("{address}: connection refused")))
        }
    }

    struct MockDialer;

    #[async_trait]
    impl Dialer for MockDialer {
        async fn dial(&self, _address: &str) -> Result<Arc<dyn ExecutionClient>> {
            Ok(Arc::new(MockExecution::default()))
        }
    }

    #[tokio::test]
    async fn dial_failure_is_connection_error() {
        let err = Client::dial(&RefusingDialer, "127.0.0.1:50211", ClientConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Connection(_)));
    }

    #[tokio::test]
    async fn dial_and_close() {
        let client = Client::dial(&MockDialer, "testnet:50211", ClientConfig::default())
            .await
            .unwrap();
        client.close().await.unwrap();
    }

    #[test]
    fn transactions_start_from_config_defaults() {
        let config = ClientConfig {
            transaction_fee: 250,
            valid_duration_secs: 30,
            ..ClientConfig::default()
        }
        .with_operator(AccountId::new(0, 0, 1001))
        .with_node(AccountId::new(0, 0, 3));
        let client = Client::new(MockExecution::answering([]), config);

        let tx = client.transaction(RawBody::new(1, vec![]));
        assert_eq!(tx.operator(), Some(AccountId::new(0, 0, 1001)));
        assert_eq!(tx.node(), Some(AccountId::new(0, 0, 3)));
        assert_eq!(tx.fee(), 250);
        assert_eq!(tx.valid_duration().as_secs(), 30);
    }

    #[test]
    fn injected_clock_is_used() {
        let at = Timestamp::new(1_600_000_000, 7);
        let client = Client::new(MockExecution::answering([]), ClientConfig::default())
            .with_clock(Arc::new(FixedClock::new(at)));
        assert_eq!(client.clock().now(), at);
    }
}
