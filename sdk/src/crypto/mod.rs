//! # Cryptographic Primitives
//!
//! Ed25519 keys and signatures, and the DER framing of their string forms.
//!
//! Everything here wraps `ed25519-dalek`; nothing is implemented by hand
//! beyond comparing fixed DER headers.

pub mod encoding;
pub mod keys;
pub mod signatures;

pub use keys::{PublicKey, SecretKey, Signature};
pub use signatures::{contains_signer, sign_pair, verify_all};
