//! DER framing for Ed25519 key material.
//!
//! Only the two fixed-shape documents Ed25519 keys use are handled, so this is
//! prefix comparison and not a general ASN.1 parser.

use crate::config::{
    PKCS8_ED25519_PREFIX, PKIX_ED25519_PREFIX, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};
use crate::error::{Result, SdkError};

/// Wraps a 32-byte seed in a PKCS#8 `PrivateKeyInfo`.
pub fn wrap_pkcs8(seed: &[u8; SECRET_KEY_LENGTH]) -> Vec<u8> {
    let mut out = Vec::with_capacity(PKCS8_ED25519_PREFIX.len() + SECRET_KEY_LENGTH);
    out.extend_from_slice(&PKCS8_ED25519_PREFIX);
    out.extend_from_slice(seed);
    out
}

/// Wraps a 32-byte point in a PKIX `SubjectPublicKeyInfo`.
pub fn wrap_pkix(point: &[u8; PUBLIC_KEY_LENGTH]) -> Vec<u8> {
    let mut out = Vec::with_capacity(PKIX_ED25519_PREFIX.len() + PUBLIC_KEY_LENGTH);
    out.extend_from_slice(&PKIX_ED25519_PREFIX);
    out.extend_from_slice(point);
    out
}

/// Extracts the seed from a PKCS#8 document.
pub fn unwrap_pkcs8(der: &[u8]) -> Result<[u8; SECRET_KEY_LENGTH]> {
    strip(der, &PKCS8_ED25519_PREFIX, "not a PKCS#8 Ed25519 secret key")
}

/// Extracts the point from a PKIX document.
pub fn unwrap_pkix(der: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
    strip(der, &PKIX_ED25519_PREFIX, "not a PKIX Ed25519 public key")
}

fn strip<const N: usize>(der: &[u8], prefix: &[u8], reason: &'static str) -> Result<[u8; N]> {
    der.strip_prefix(prefix)
        .and_then(|rest| <[u8; N]>::try_from(rest).ok())
        .ok_or(SdkError::InvalidKeyEncoding(reason))
}
