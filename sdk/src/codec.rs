//! # Wire Codec
//!
//! Little-endian encoding of the values that cross the execution-client
//! boundary. Writers append to a `BytesMut`; [`Reader`] walks a borrowed
//! slice and turns every short read into a
//! [`ProtocolViolation`](SdkError::ProtocolViolation), since the bytes it
//! reads always come from the node.
//!
//! ```text
//! AccountId      i64 shard | i64 realm | i64 account
//! Timestamp      i64 seconds | i32 nanos
//! TransactionId  AccountId | Timestamp
//! bytes          u32 len | len bytes
//! string         u32 len | len bytes of UTF-8
//! option<T>      u8 0  |  u8 1 | T
//! ```

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, SdkError};
use crate::identity::{AccountId, Timestamp, TransactionId};

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Appends an account id.
pub fn put_account_id(buf: &mut BytesMut, id: &AccountId) {
    // Components are bounded by i64::MAX, so the casts are lossless.
    buf.put_i64_le(id.shard() as i64);
    buf.put_i64_le(id.realm() as i64);
    buf.put_i64_le(id.account() as i64);
}

/// Appends a timestamp.
pub fn put_timestamp(buf: &mut BytesMut, ts: &Timestamp) {
    buf.put_i64_le(ts.seconds);
    buf.put_i32_le(ts.nanos);
}

/// Appends a transaction id.
pub fn put_transaction_id(buf: &mut BytesMut, id: &TransactionId) {
    put_account_id(buf, &id.account_id);
    put_timestamp(buf, &id.valid_start);
}

/// Appends a `u32` length prefix followed by `bytes`.
///
/// Fails with [`SdkError::PayloadTooLarge`] if the length does not fit the
/// prefix.
pub fn put_bytes(buf: &mut BytesMut, bytes: &[u8]) -> Result<()> {
    buf.put_u32_le(length_prefix(bytes.len())?);
    buf.put_slice(bytes);
    Ok(())
}

/// Converts a length to its `u32` wire prefix.
pub fn length_prefix(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| SdkError::PayloadTooLarge(len))
}

/// Appends optional bytes as a presence flag plus length-prefixed bytes.
pub fn put_optional_bytes(buf: &mut BytesMut, value: Option<&[u8]>) -> Result<()> {
    match value {
        Some(bytes) => {
            buf.put_u8(1);
            put_bytes(buf, bytes)
        }
        None => {
            buf.put_u8(0);
            Ok(())
        }
    }
}

/// Appends an optional string as a presence flag plus length-prefixed UTF-8.
pub fn put_optional_str(buf: &mut BytesMut, value: Option<&str>) -> Result<()> {
    put_optional_bytes(buf, value.map(str::as_bytes))
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Cursor over bytes received from a node.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Starts reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn need(&self, n: usize, what: &str) -> Result<()> {
        if self.buf.remaining() < n {
            return Err(SdkError::violation(format!(
                "truncated {what}: need {n} bytes, have {}",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn u8(&mut self, what: &str) -> Result<u8> {
        self.need(1, what)?;
        Ok(self.buf.get_u8())
    }

    pub fn u32(&mut self, what: &str) -> Result<u32> {
        self.need(4, what)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn u64(&mut self, what: &str) -> Result<u64> {
        self.need(8, what)?;
        Ok(self.buf.get_u64_le())
    }

    pub fn i32(&mut self, what: &str) -> Result<i32> {
        self.need(4, what)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn i64(&mut self, what: &str) -> Result<i64> {
        self.need(8, what)?;
        Ok(self.buf.get_i64_le())
    }

    /// Reads exactly `N` bytes.
    pub fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        self.need(N, what)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Reads a `u32` length prefix and that many bytes.
    pub fn bytes(&mut self, what: &str) -> Result<&'a [u8]> {
        let len = self.u32(what)? as usize;
        self.need(len, what)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Reads three `i64` components. Negative components are a violation.
    pub fn account_id(&mut self, what: &str) -> Result<AccountId> {
        let shard = self.i64(what)?;
        let realm = self.i64(what)?;
        let account = self.i64(what)?;
        AccountId::try_new(shard, realm, account).map_err(|_| {
            SdkError::violation(format!(
                "negative component in {what}: {shard}.{realm}.{account}"
            ))
        })
    }

    /// Reads seconds and nanos. Nanos outside `0..1_000_000_000` are a
    /// violation.
    pub fn timestamp(&mut self, what: &str) -> Result<Timestamp> {
        let seconds = self.i64(what)?;
        let nanos = self.i32(what)?;
        Timestamp::try_new(seconds, nanos).map_err(|_| {
            SdkError::violation(format!("nanos out of range in {what}: {seconds}.{nanos}"))
        })
    }

    pub fn transaction_id(&mut self, what: &str) -> Result<TransactionId> {
        let account_id = self.account_id(what)?;
        let valid_start = self.timestamp(what)?;
        Ok(TransactionId::from_parts(account_id, valid_start))
    }

    /// Fails if anything is left over.
    pub fn finish(self, what: &str) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(SdkError::violation(format!(
                "{} trailing bytes after {what}",
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}
