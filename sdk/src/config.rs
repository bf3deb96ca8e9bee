//! # Protocol Constants & Client Configuration
//!
//! Every fixed number the SDK relies on lives here: key sizes, the DER
//! prefixes of the key string forms, and the defaults a transaction starts
//! with. Changing any of the wire-facing constants breaks interoperability
//! with the network, so they are `const` and not configurable.
//!
//! [`ClientConfig`] holds the per-client defaults a caller *can* change. It
//! deserializes from TOML:
//!
//! ```toml
//! operator = "0.0.1001"
//! operator_key = "302e020100300506032b657004220420..."
//! node = "0.0.3"
//! transaction_fee = 100000
//! valid_duration_secs = 120
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::crypto::SecretKey;
use crate::error::{Result, SdkError};
use crate::identity::AccountId;

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// Ed25519 seed length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 public point length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// DER header of a PKCS#8 `PrivateKeyInfo` carrying an Ed25519 seed
/// (OID 1.3.101.112). The 32 seed bytes follow directly.
pub const PKCS8_ED25519_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];

/// DER header of a PKIX `SubjectPublicKeyInfo` carrying an Ed25519 point.
/// The 32 point bytes follow directly.
pub const PKIX_ED25519_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

// ---------------------------------------------------------------------------
// Transaction defaults
// ---------------------------------------------------------------------------

/// Fee offered when the caller does not set one, in tinybars.
pub const DEFAULT_TRANSACTION_FEE: u64 = 10;

/// How long after its valid start a transaction may still be processed.
pub const DEFAULT_VALID_DURATION: Duration = Duration::from_secs(120);

/// Longest memo the network accepts, in UTF-8 bytes.
pub const MAX_MEMO_BYTES: usize = 100;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Defaults applied to every transaction and query built from a
/// [`Client`](crate::client::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Paying account pre-filled on new transactions.
    pub operator: Option<AccountId>,
    /// Key of the operator. When set, a transaction still paid by the
    /// operator and carrying no signature is signed with it at execution.
    pub operator_key: Option<SecretKey>,
    /// Node account pre-filled on new transactions.
    pub node: Option<AccountId>,
    /// Fee offered on new transactions.
    pub transaction_fee: u64,
    /// Validity window of new transactions, in seconds.
    pub valid_duration_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            operator: None,
            operator_key: None,
            node: None,
            transaction_fee: DEFAULT_TRANSACTION_FEE,
            valid_duration_secs: DEFAULT_VALID_DURATION.as_secs(),
        }
    }
}

impl ClientConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Sets the operator account.
    pub fn with_operator(mut self, operator: AccountId) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Sets the operator's key.
    pub fn with_operator_key(mut self, key: SecretKey) -> Self {
        self.operator_key = Some(key);
        self
    }

    /// Sets the node account.
    pub fn with_node(mut self, node: AccountId) -> Self {
        self.node = Some(node);
        self
    }

    /// The validity window as a `Duration`.
    pub fn valid_duration(&self) -> Duration {
        Duration::from_secs(self.valid_duration_secs)
    }
}
