use alloy_primitives::Bloom;

use crate::log::{logs_bloom, Log};

/// The outcome of executing one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The EIP-2718 type byte of the transaction this receipt belongs to.
    pub tx_type: u8,
    /// `false` for a reverted or otherwise failed transaction. Always `true` pre-Byzantium,
    /// since status codes were not recorded before EIP-658 (the "receipt" position instead held
    /// an intermediate state root, which this crate does not reconstruct).
    pub success: bool,
    /// Gas used by this transaction plus every transaction before it in the block.
    pub cumulative_gas_used: u64,
    pub logs: Vec<Log>,
}

impl Receipt {
    pub fn bloom(&self) -> Bloom {
        logs_bloom(&self.logs)
    }
}

/// A [`Receipt`] paired with its precomputed bloom, the unit [`crate::trie`]-root hashing and RLP
/// encoding operate over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptWithBloom {
    pub receipt: Receipt,
    pub bloom: Bloom,
}

impl From<Receipt> for ReceiptWithBloom {
    fn from(receipt: Receipt) -> Self {
        let bloom = receipt.bloom();
        Self { receipt, bloom }
    }
}

/// Composes the block-level logs bloom as the bitwise-OR of every receipt's bloom.
pub fn block_bloom<'a>(receipts: impl IntoIterator<Item = &'a Receipt>) -> Bloom {
    receipts.into_iter().fold(Bloom::ZERO, |acc, r| acc | r.bloom())
}
