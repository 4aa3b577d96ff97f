use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};

/// A block header.
///
/// Fields follow the Ethereum Yellow Paper block header exactly; `base_fee_per_gas` is `None`
/// for any block produced before the London hard fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub parent_hash: B256,
    pub ommers_hash: B256,
    pub beneficiary: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Bytes,
    pub mix_hash: B256,
    pub nonce: B64,
    /// `None` pre-London, `Some` from London onward.
    pub base_fee_per_gas: Option<u64>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            parent_hash: B256::ZERO,
            ommers_hash: EMPTY_OMMER_ROOT_HASH,
            beneficiary: Address::ZERO,
            state_root: B256::ZERO,
            transactions_root: EMPTY_TRANSACTIONS_ROOT,
            receipts_root: EMPTY_RECEIPTS_ROOT,
            logs_bloom: Bloom::ZERO,
            difficulty: U256::ZERO,
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Bytes::new(),
            mix_hash: B256::ZERO,
            nonce: B64::ZERO,
            base_fee_per_gas: None,
        }
    }
}

impl Header {
    /// `keccak256(rlp(header))`. The caller supplies the encoder since RLP is consumed through a
    /// narrow interface rather than implemented in this crate (§4.G).
    pub fn hash_with(&self, encode_and_hash: impl FnOnce(&Header) -> B256) -> B256 {
        encode_and_hash(self)
    }
}

/// `keccak256(rlp([]))`, the ommers hash of a block with no ommers.
pub const EMPTY_OMMER_ROOT_HASH: B256 = alloy_primitives::b256!(
    "1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
);

/// Root hash of an empty transactions trie.
pub const EMPTY_TRANSACTIONS_ROOT: B256 = alloy_primitives::b256!(
    "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"
);

/// Root hash of an empty receipts trie (same constant as the empty transactions root: both are
/// the root of an empty Merkle-Patricia trie).
pub const EMPTY_RECEIPTS_ROOT: B256 = EMPTY_TRANSACTIONS_ROOT;
