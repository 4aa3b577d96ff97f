use alloy_primitives::{B256, U256};

use crate::{header::Header, transaction::TransactionSigned};

/// A full Ethereum block: header, transactions and ommer (uncle) headers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<TransactionSigned>,
    pub ommers: Vec<Header>,
}

/// Identifies a block by the pair that's always available without a trie lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockNumHash {
    pub number: u64,
    pub hash: B256,
}

impl BlockNumHash {
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

/// A block paired with the cumulative difficulty of the chain that produced it — the pre-Merge
/// canonicalization tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockWithTotalDifficulty {
    pub block: Block,
    pub total_difficulty: U256,
}
