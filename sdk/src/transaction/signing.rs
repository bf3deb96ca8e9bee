//! Transaction signing.
//!
//! Signing is a separate step from building because keys may not be
//! available where the transaction is assembled. Signatures accumulate: each
//! distinct key adds one `(public key, signature)` pair over the same
//! [`Transaction::signable_bytes`].
//!
//! The first signature fixes the transaction id (from the operator and the
//! client's clock, unless one was set explicitly) and freezes every signed
//! field, so later signers sign exactly what earlier ones did.

use tracing::debug;

use super::builder::Transaction;
use super::types::TransactionBody;
use crate::crypto::{contains_signer, verify_all, SecretKey};
use crate::error::{Result, SdkError};
use crate::identity::TransactionId;

impl<B: TransactionBody> Transaction<B> {
    /// Signs the transaction with `secret` and appends the pair.
    ///
    /// # Errors
    ///
    /// - [`SdkError::TransactionAlreadySent`] after execution.
    /// - [`SdkError::IncompleteTransaction`] without operator or node.
    /// - [`SdkError::PayerMismatch`] if a pinned id names another payer.
    /// - [`SdkError::DuplicateSignature`] if this key already signed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: hedera_sdk::Client) -> hedera_sdk::Result<()> {
    /// use hedera_sdk::{AccountId, RawBody, SecretKey};
    ///
    /// let key = SecretKey::generate();
    /// let mut tx = client.transaction(RawBody::new(12, vec![]));
    /// tx.set_operator(AccountId::new(0, 0, 1001))?
    ///     .set_node(AccountId::new(0, 0, 3))?
    ///     .sign(&key)?;
    /// let _response = tx.execute().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn sign(&mut self, secret: &SecretKey) -> Result<&mut Self> {
        if self.state() == super::TransactionState::Sent {
            return Err(SdkError::TransactionAlreadySent);
        }
        let operator = self
            .operator
            .ok_or(SdkError::IncompleteTransaction("operator"))?;
        if self.node.is_none() {
            return Err(SdkError::IncompleteTransaction("node"));
        }
        Self::check_payer(Some(operator), self.transaction_id)?;

        let public = secret.public_key();
        if contains_signer(&self.signatures, &public) {
            return Err(SdkError::DuplicateSignature(public.to_string()));
        }

        if self.transaction_id.is_none() {
            self.transaction_id = Some(TransactionId::with_clock(operator, self.client().clock()));
        }

        let message = self.signable_bytes()?;
        let signature = secret.sign(&message);
        self.signatures.push((public, signature));

        debug!(
            transaction_id = ?self.transaction_id,
            signer = %public.to_raw_hex(),
            signatures = self.signatures.len(),
            "transaction signed"
        );
        Ok(self)
    }

    /// Checks every attached signature against the current signable bytes.
    ///
    /// `false` for an unsigned transaction.
    pub fn verify_signatures(&self) -> bool {
        if self.signatures.is_empty() {
            return false;
        }
        match self.signable_bytes() {
            Ok(message) => verify_all(&message, &self.signatures),
            Err(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
