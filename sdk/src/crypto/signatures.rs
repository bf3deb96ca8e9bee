//! # Signature Checks
//!
//! Helpers for checking the signature list attached to a transaction.
//!
//! A signed transaction carries `(public key, signature)` pairs over one
//! shared message (its signable bytes). These functions answer two questions
//! about such a list: is every pair valid, and is a given key already in it.

use super::keys::{PublicKey, SecretKey, Signature};

/// Signs `message` with `secret` and returns the pair as it is stored on a
/// transaction.
pub fn sign_pair(secret: &SecretKey, message: &[u8]) -> (PublicKey, Signature) {
    (secret.public_key(), secret.sign(message))
}

/// Verifies every pair against `message`.
///
/// An empty list is vacuously valid. This does not say which pair failed;
/// verify individually with [`PublicKey::verify`] if you need that.
pub fn verify_all(message: &[u8], pairs: &[(PublicKey, Signature)]) -> bool {
    pairs
        .iter()
        .all(|(public, signature)| public.verify(message, signature))
}

/// Whether `public` has already signed.
pub fn contains_signer(pairs: &[(PublicKey, Signature)], public: &PublicKey) -> bool {
    pairs.iter().any(|(pk, _)| pk == public)
}
