//! Account balance query.

use bytes::BytesMut;

use super::QueryIntent;
use crate::codec::{self, Reader};
use crate::error::Result;
use crate::identity::AccountId;

/// Asks for the balance of one account. Answers with tinybars as `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    pub account: AccountId,
}

impl AccountBalance {
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }
}

impl QueryIntent for AccountBalance {
    const TAG: u8 = 1;

    type Answer = u64;

    fn build_request(&self, buf: &mut BytesMut) {
        codec::put_account_id(buf, &self.account);
    }

    fn decode_answer(reader: &mut Reader<'_>) -> Result<u64> {
        reader.u64("account balance")
    }
}
