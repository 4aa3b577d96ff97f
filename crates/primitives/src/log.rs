use alloy_primitives::{Address, Bloom, Bytes, B256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// Maximum number of indexed topics a single log may carry (`LOG0`..`LOG4`).
pub const MAX_LOG_TOPICS: usize = 4;

/// A single EVM log entry.
///
/// `RlpEncodable`/`RlpDecodable` give the receipts-trie encoder (§4.G) the `[address, topics,
/// data]` triple the Yellow Paper specifies without this crate owning any trie logic itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable, RlpDecodable)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl Log {
    /// Accrues this log's address and topics into `bloom`.
    ///
    /// Each of the address and every topic contributes three set bits derived from its
    /// Keccak-256 hash (EIP's 2048-bit / 256-byte bloom filter).
    pub fn accrue_bloom(&self, bloom: &mut Bloom) {
        bloom.accrue(alloy_primitives::bloom::BloomInput::Raw(self.address.as_slice()));
        for topic in &self.topics {
            bloom.accrue(alloy_primitives::bloom::BloomInput::Raw(topic.as_slice()));
        }
    }
}

/// Composes the logs bloom for a full set of logs, starting from a zeroed filter.
pub fn logs_bloom<'a>(logs: impl IntoIterator<Item = &'a Log>) -> Bloom {
    let mut bloom = Bloom::ZERO;
    for log in logs {
        log.accrue_bloom(&mut bloom);
    }
    bloom
}
