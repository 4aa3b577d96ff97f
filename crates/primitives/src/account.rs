use alloy_primitives::{B256, U256};

/// In-state representation of an externally-owned or contract account.
///
/// Code is not stored inline: it lives in a separate map keyed by
/// [`Account::bytecode_hash`] so that identical bytecode is only stored once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    /// `None` for accounts with no code (including all EOAs).
    pub bytecode_hash: Option<B256>,
}

impl Account {
    /// The hash of empty bytecode, `keccak256([])`.
    pub const EMPTY_CODE_HASH: B256 = alloy_primitives::b256!(
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );

    /// An account is "touched but empty" (and thus, from Spurious Dragon onward, removed at the
    /// end of a transaction) when it has no balance, no nonce and no code.
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.bytecode_hash.is_none()
    }

    pub fn has_bytecode(&self) -> bool {
        self.bytecode_hash.is_some()
    }
}
