//! Plain-state byte encoding for [`Account`].
//!
//! This is *not* the consensus RLP account leaf used by the state trie (see
//! [`crate::state::CacheState::state_root`], which builds that encoding separately via
//! `alloy_rlp::RlpEncodable`) — it is this workspace's own fixed-width internal representation for
//! `Table::PlainState`/`Table::AccountChangeSet` rows, chosen because nothing outside this crate
//! ever reads a `PlainState` row directly.

use alloy_primitives::{B256, U256};
use execore_primitives::Account;

const NONCE_LEN: usize = 8;
const BALANCE_LEN: usize = 32;
const CODE_HASH_LEN: usize = 32;
const ACCOUNT_LEN: usize = NONCE_LEN + BALANCE_LEN + 1 + CODE_HASH_LEN;

pub fn encode_account(account: &Account) -> Vec<u8> {
    let mut buf = Vec::with_capacity(ACCOUNT_LEN);
    buf.extend_from_slice(&account.nonce.to_be_bytes());
    buf.extend_from_slice(&account.balance.to_be_bytes::<BALANCE_LEN>());
    match account.bytecode_hash {
        Some(hash) => {
            buf.push(1);
            buf.extend_from_slice(hash.as_slice());
        }
        None => buf.push(0),
    }
    buf
}

pub fn decode_account(bytes: &[u8]) -> Option<Account> {
    if bytes.len() != ACCOUNT_LEN {
        return None;
    }
    let nonce = u64::from_be_bytes(bytes[..NONCE_LEN].try_into().ok()?);
    let balance = U256::from_be_slice(&bytes[NONCE_LEN..NONCE_LEN + BALANCE_LEN]);
    let flag_offset = NONCE_LEN + BALANCE_LEN;
    let bytecode_hash = match bytes[flag_offset] {
        1 => Some(B256::from_slice(&bytes[flag_offset + 1..flag_offset + 1 + CODE_HASH_LEN])),
        _ => None,
    };
    Some(Account { nonce, balance, bytecode_hash })
}

/// Encodes an optional account (`None` meaning "did not exist"), used for change-set rows where
/// the prior value may be the account's absence rather than any particular balance/nonce.
pub fn encode_account_opt(account: Option<&Account>) -> Vec<u8> {
    match account {
        Some(account) => {
            let mut buf = vec![1u8];
            buf.extend_from_slice(&encode_account(account));
            buf
        }
        None => vec![0u8],
    }
}

pub fn decode_account_opt(bytes: &[u8]) -> Option<Account> {
    if bytes.is_empty() || bytes[0] == 0 {
        return None;
    }
    decode_account(&bytes[1..])
}
