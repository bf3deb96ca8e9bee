//! # Key Management
//!
//! Ed25519 secret keys, public keys and signatures.
//!
//! ## String forms
//!
//! Keys travel as hex text wrapping a small DER document:
//!
//! ```text
//! secret: 302e020100300506032b657004220420 || seed(32)     (PKCS#8)
//! public: 302a300506032b6570032100         || point(32)    (PKIX)
//! ```
//!
//! Parsing also accepts the bare 32-byte forms, and for secrets the 64-byte
//! `seed || public` layout some wallets export. Every failure is reported as
//! [`SdkError::InvalidKeyEncoding`] with a fixed message; key bytes never end
//! up in errors, `Debug` output or logs.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::encoding::{unwrap_pkcs8, unwrap_pkix, wrap_pkcs8, wrap_pkix};
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::error::{Result, SdkError};

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// An Ed25519 secret key (the 32-byte seed).
///
/// Whoever holds this value can sign for the account, so it is deliberately
/// not `Serialize`. Converting it to a string is an explicit
/// [`to_string`](ToString::to_string) call.
///
/// # Examples
///
/// ```
/// use hedera_sdk::crypto::{PublicKey, SecretKey};
///
/// let secret = SecretKey::generate();
/// let restored: SecretKey = secret.to_string().parse().unwrap();
/// assert_eq!(PublicKey::from(&secret), PublicKey::from(&restored));
/// ```
#[derive(Clone)]
pub struct SecretKey(SigningKey);

impl SecretKey {
    /// Samples a new key from the OS CSPRNG.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    /// Builds a key from a raw seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    /// Decodes raw bytes: a PKCS#8 document, a bare seed, or `seed || public`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            SECRET_KEY_LENGTH => Ok(Self::from_seed(&to_array(bytes)?)),
            len if len == SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH => {
                let (seed, public) = bytes.split_at(SECRET_KEY_LENGTH);
                let key = Self::from_seed(&to_array(seed)?);
                if key.0.verifying_key().as_bytes() != public {
                    return Err(SdkError::InvalidKeyEncoding(
                        "public half does not match secret seed",
                    ));
                }
                Ok(key)
            }
            _ => Ok(Self::from_seed(&unwrap_pkcs8(bytes)?)),
        }
    }

    /// Parses the hex string form.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| SdkError::InvalidKeyEncoding("not valid hex"))?;
        Self::from_bytes(&bytes)
    }

    /// The PKCS#8 DER document for this key.
    pub fn to_der(&self) -> Vec<u8> {
        wrap_pkcs8(&self.0.to_bytes())
    }

    /// The raw seed. Handle with care.
    pub fn to_seed(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    /// Signs `message`. Ed25519 is deterministic, so the same key and message
    /// always give the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message))
    }
}

impl FromStr for SecretKey {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_der()))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the public half, never the seed.
        write!(f, "SecretKey(public={})", self.public_key().to_raw_hex())
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        // SigningKey equality is constant-time.
        self.0 == other.0
    }
}

impl Eq for SecretKey {}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// An Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Decodes raw bytes: a PKIX document or a bare 32-byte point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = if bytes.len() == PUBLIC_KEY_LENGTH {
            to_array(bytes)?
        } else {
            unwrap_pkix(bytes)?
        };
        VerifyingKey::from_bytes(&point)
            .map(Self)
            .map_err(|_| SdkError::InvalidKeyEncoding("not a valid Ed25519 point"))
    }

    /// Parses the hex string form.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| SdkError::InvalidKeyEncoding("not valid hex"))?;
        Self::from_bytes(&bytes)
    }

    /// The raw 32-byte point.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// The PKIX DER document for this key.
    pub fn to_der(&self) -> Vec<u8> {
        wrap_pkix(self.0.as_bytes())
    }

    /// Hex of the raw point, without the PKIX header.
    pub fn to_raw_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Checks `signature` over `message`.
    ///
    /// A plain yes/no: callers never need to know why a signature is bad.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.0.verify(message, &signature.0).is_ok()
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(secret: &SecretKey) -> Self {
        secret.public_key()
    }
}

impl FromStr for PublicKey {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_bytes().hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_der()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_raw_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(DalekSignature);

impl Signature {
    /// Wraps raw signature bytes.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        Self(DalekSignature::from_bytes(bytes))
    }

    /// The raw bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0.to_bytes()
    }
}

impl FromStr for Signature {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|_| SdkError::InvalidKeyEncoding("signature is not valid hex"))?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SdkError::InvalidKeyEncoding("signature must be 64 bytes"))?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_string();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| SdkError::InvalidKeyEncoding("wrong key length"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known-good vectors: a PKCS#8 secret, its PKIX public key, and the
    // signature it produces over MESSAGE.
    const PUBLIC_DER_HEX: &str =
        "302a300506032b6570032100e0c8ec2758a5879ffac226a13c0c516b799e72e35141a0dd828f94d37988a4b7";
    const PUBLIC_RAW_HEX: &str = "e0c8ec2758a5879ffac226a13c0c516b799e72e35141a0dd828f94d37988a4b7";
    const SECRET_DER_HEX: &str =
        "302e020100300506032b657004220420db484b828e64b2d8f12ce3c0a0e93a0b8cce7af1bb8f39c97732394482538e10";
    const SECRET_PAIR_HEX: &str = "db484b828e64b2d8f12ce3c0a0e93a0b8cce7af1bb8f39c97732394482538e10\
                                   e0c8ec2758a5879ffac226a13c0c516b799e72e35141a0dd828f94d37988a4b7";
    const MESSAGE: &[u8] = b"This is a message about the world.";
    const SIGNATURE_HEX: &str = "73bea53f31ca9c42a422ecb7516ec08d0bbd1a6bfd630ccf10ec1872454814d2\
                                 9f4a8011129cd007eab544af01a75f508285b591e5bed24b68f927751e49e30e";

    #[test]
    fn parses_known_vectors() {
        let secret = SecretKey::parse(SECRET_DER_HEX).unwrap();
        let from_pair = SecretKey::parse(SECRET_PAIR_HEX).unwrap();
        let public = PublicKey::parse(PUBLIC_DER_HEX).unwrap();
        let public_raw = PublicKey::parse(PUBLIC_RAW_HEX).unwrap();

        assert_eq!(secret, from_pair);
        assert_eq!(public, public_raw);
        assert_eq!(PublicKey::from(&secret), public);
    }

    #[test]
    fn secret_display_is_pkcs8_hex() {
        let secret = SecretKey::parse(SECRET_DER_HEX).unwrap();
        assert_eq!(secret.to_string(), SECRET_DER_HEX);
    }

    #[test]
    fn public_display_is_pkix_hex() {
        let public = PublicKey::parse(PUBLIC_RAW_HEX).unwrap();
        assert_eq!(public.to_string(), PUBLIC_DER_HEX);
        assert_eq!(public.to_raw_hex(), PUBLIC_RAW_HEX);
    }

    #[test]
    fn signs_known_vector() {
        let secret = SecretKey::parse(SECRET_DER_HEX).unwrap();
        let signature = secret.sign(MESSAGE);
        assert_eq!(signature.to_string(), SIGNATURE_HEX);

        let public = PublicKey::parse(PUBLIC_DER_HEX).unwrap();
        let parsed: Signature = SIGNATURE_HEX.parse().unwrap();
        assert!(public.verify(MESSAGE, &parsed));
    }

    #[test]
    fn generated_key_round_trips_through_string() {
        let secret = SecretKey::generate();
        let restored = SecretKey::parse(&secret.to_string()).unwrap();
        assert_eq!(secret, restored);
        assert_eq!(secret.to_seed(), restored.to_seed());
    }

    #[test]
    fn public_key_round_trips_through_string() {
        let public = SecretKey::generate().public_key();
        assert_eq!(PublicKey::parse(&public.to_string()).unwrap(), public);
    }

    #[test]
    fn public_derivation_is_deterministic() {
        let secret = SecretKey::generate();
        assert_eq!(
            PublicKey::from(&secret).to_bytes(),
            PublicKey::from(&secret).to_bytes()
        );
    }

    #[test]
    fn two_generated_keys_differ() {
        assert_ne!(SecretKey::generate(), SecretKey::generate());
    }

    #[test]
    fn rejects_bad_secret_encodings() {
        // Not hex.
        assert!(SecretKey::parse("not-hex").is_err());
        // Odd length.
        assert!(SecretKey::parse("abc").is_err());
        // Too short.
        assert!(SecretKey::parse("deadbeef").is_err());
        // Right length, wrong header (PKIX instead of PKCS#8).
        let wrong_header = format!(
            "{}{}",
            "302a300506032b657003210000000000",
            &SECRET_DER_HEX[32..]
        );
        assert!(SecretKey::parse(&wrong_header).is_err());
        // Pair whose public half belongs to another key.
        let mismatched = format!("{}{}", &SECRET_PAIR_HEX[..64], "00".repeat(32));
        assert!(matches!(
            SecretKey::parse(&mismatched),
            Err(SdkError::InvalidKeyEncoding(_))
        ));
    }

    #[test]
    fn rejects_bad_public_encodings() {
        assert!(PublicKey::parse("zz").is_err());
        assert!(PublicKey::parse(&PUBLIC_DER_HEX[2..]).is_err());
        // Truncated PKIX document.
        assert!(PublicKey::parse(&PUBLIC_DER_HEX[..PUBLIC_DER_HEX.len() - 2]).is_err());
    }

    #[test]
    fn signature_verification_is_bound_to_message_and_key() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        let sig = a.sign(b"correct");

        assert!(a.public_key().verify(b"correct", &sig));
        assert!(!a.public_key().verify(b"wrong", &sig));
        assert!(!b.public_key().verify(b"correct", &sig));
    }

    #[test]
    fn signature_string_round_trip() {
        let sig = SecretKey::generate().sign(b"memo");
        let parsed: Signature = sig.to_string().parse().unwrap();
        assert_eq!(sig, parsed);
        assert!("abcd".parse::<Signature>().is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let secret = SecretKey::parse(SECRET_DER_HEX).unwrap();
        let debug = format!("{:?}", secret);
        assert!(debug.starts_with("SecretKey(public="));
        assert!(!debug.contains("db484b828e64"));
    }

    #[test]
    fn public_key_serde_uses_string_form() {
        let public = PublicKey::parse(PUBLIC_RAW_HEX).unwrap();
        let json = serde_json::to_string(&public).unwrap();
        assert_eq!(json, format!("\"{}\"", PUBLIC_DER_HEX));
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), public);
    }

    #[test]
    fn secret_key_serde_uses_string_form() {
        let secret = SecretKey::parse(SECRET_DER_HEX).unwrap();
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, format!("\"{}\"", SECRET_DER_HEX));
        assert_eq!(serde_json::from_str::<SecretKey>(&json).unwrap(), secret);
        assert!(serde_json::from_str::<SecretKey>("\"zz\"").is_err());
    }
}
