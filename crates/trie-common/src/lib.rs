//! §4.G's Codec Interfaces: the narrow seams through which the Merkle-Patricia trie and the logs
//! bloom are consumed. Neither the trie nor Keccak-256 are implemented here — `alloy-trie`
//! supplies the former, and hashing keys (addresses, storage slots) is the caller's job; both
//! are consumed through narrow interfaces rather than owned by this core.

use alloy_primitives::B256;
use alloy_trie::{HashBuilder, Nibbles, EMPTY_ROOT_HASH};

/// Computes a Merkle-Patricia root over a set of `(key, value)` leaves.
pub trait RootHasher {
    /// `entries` must already be sorted ascending by `key` — the order `alloy_trie::HashBuilder`
    /// requires leaves to be inserted in. Used directly for the state/storage tries, whose keys
    /// are hashed addresses/slots and therefore need an explicit sort by the caller.
    fn root_hash_from_entries(&self, entries: &[(Vec<u8>, Vec<u8>)]) -> B256;

    /// Convenience for the transactions/receipts tries: items are keyed by their RLP-encoded
    /// sequential index. Index 0 RLP-encodes to `0x80` (the empty-string/zero encoding), which
    /// sorts *after* the single-byte encodings of indices 1..=127 (`0x01..=0x7f`), so the
    /// natural enumeration order is not key order; entries are sorted by encoded key before
    /// being handed to [`Self::root_hash_from_entries`].
    fn root_hash<T>(&self, items: &[T], encode: impl Fn(&T) -> Vec<u8>) -> B256
    where
        Self: Sized,
    {
        let mut entries: Vec<(Vec<u8>, Vec<u8>)> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (alloy_rlp::encode(index as u64), encode(item)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        self.root_hash_from_entries(&entries)
    }
}

/// The one concrete [`RootHasher`] this crate ships: an in-memory `alloy_trie::HashBuilder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedTrieRoot;

impl RootHasher for OrderedTrieRoot {
    fn root_hash_from_entries(&self, entries: &[(Vec<u8>, Vec<u8>)]) -> B256 {
        if entries.is_empty() {
            return EMPTY_ROOT_HASH;
        }
        let mut builder = HashBuilder::default();
        for (key, value) in entries {
            builder.add_leaf(Nibbles::unpack(key), value);
        }
        builder.root()
    }
}

pub mod bloom {
    pub use execore_primitives::{block_bloom, logs_bloom};
}

pub mod rlp {
    //! `rlp::encode(receipt) -> bytes` (§4.G): canonical receipt encoding for the receipts trie,
    //! typed receipts (post-Berlin) prefixed with the EIP-2718 type byte exactly as
    //! `reth_primitives::ReceiptWithBloom`'s `Encodable` impl does.

    use alloy_rlp::{BufMut, Encodable};
    use execore_primitives::{ReceiptWithBloom, LEGACY_TX_TYPE_ID};

    /// RLP payload encoded by the receipts trie: `[status, cumulative_gas_used, bloom, logs]`,
    /// prefixed with the raw type byte for every non-legacy receipt (EIP-2718).
    pub fn encode_receipt(receipt: &ReceiptWithBloom) -> Vec<u8> {
        let mut out = Vec::new();
        if receipt.receipt.tx_type != LEGACY_TX_TYPE_ID {
            out.put_u8(receipt.receipt.tx_type);
        }
        encode_receipt_payload(receipt, &mut out);
        out
    }

    fn encode_receipt_payload(receipt: &ReceiptWithBloom, out: &mut dyn BufMut) {
        let header = alloy_rlp::Header {
            list: true,
            payload_length: receipt.receipt.success.length()
                + receipt.receipt.cumulative_gas_used.length()
                + receipt.bloom.length()
                + receipt.receipt.logs.length(),
        };
        header.encode(out);
        receipt.receipt.success.encode(out);
        receipt.receipt.cumulative_gas_used.encode(out);
        receipt.bloom.encode(out);
        receipt.receipt.logs.encode(out);
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use execore_primitives::Receipt;

        #[test]
        fn legacy_receipt_has_no_type_prefix() {
            let receipt: ReceiptWithBloom =
                Receipt { tx_type: LEGACY_TX_TYPE_ID, success: true, cumulative_gas_used: 21_000, logs: vec![] }
                    .into();
            let encoded = encode_receipt(&receipt);
            // A legacy receipt's RLP always starts with a list header byte (>= 0xc0); a typed
            // receipt's type byte (1 or 2) would be mistaken for one only by coincidence, so
            // assert on the concrete type-tag path below instead for the typed case.
            assert!(encoded[0] >= 0xc0);
        }

        #[test]
        fn typed_receipt_is_prefixed_with_its_type_byte() {
            let receipt: ReceiptWithBloom =
                Receipt { tx_type: 2, success: true, cumulative_gas_used: 21_000, logs: vec![] }.into();
            let encoded = encode_receipt(&receipt);
            assert_eq!(encoded[0], 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_the_empty_root() {
        let items: Vec<u8> = vec![];
        assert_eq!(OrderedTrieRoot.root_hash(&items, |b| vec![*b]), EMPTY_ROOT_HASH);
    }

    #[test]
    fn single_item_root_is_deterministic() {
        let items = vec![vec![1u8, 2, 3]];
        let a = OrderedTrieRoot.root_hash(&items, |item| item.clone());
        let b = OrderedTrieRoot.root_hash(&items, |item| item.clone());
        assert_eq!(a, b);
        assert_ne!(a, EMPTY_ROOT_HASH);
    }

    #[test]
    fn order_of_items_affects_the_root() {
        let forward = vec![vec![1u8], vec![2u8]];
        let backward = vec![vec![2u8], vec![1u8]];
        let a = OrderedTrieRoot.root_hash(&forward, |item| item.clone());
        let b = OrderedTrieRoot.root_hash(&backward, |item| item.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn keyed_entries_must_be_pre_sorted_by_caller() {
        let entries = vec![
            (vec![0x01], vec![1u8]),
            (vec![0x02], vec![2u8]),
        ];
        let root = OrderedTrieRoot.root_hash_from_entries(&entries);
        assert_ne!(root, EMPTY_ROOT_HASH);
    }
}
