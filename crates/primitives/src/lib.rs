//! Core Ethereum data types shared by every layer of the execution core: accounts, logs,
//! headers, transactions, receipts and blocks.
//!
//! Hashing, RLP encoding and trie root computation are deliberately not implemented here — they
//! are consumed through the narrow interfaces described in `execore-trie-common`, per the
//! execution core's scope (the Merkle-Patricia trie and Keccak-256 are external collaborators).

mod account;
mod block;
mod header;
mod log;
mod receipt;
mod transaction;

pub use account::Account;
pub use block::{Block, BlockNumHash, BlockWithTotalDifficulty};
pub use header::{Header, EMPTY_OMMER_ROOT_HASH, EMPTY_RECEIPTS_ROOT, EMPTY_TRANSACTIONS_ROOT};
pub use log::{logs_bloom, Log, MAX_LOG_TOPICS};
pub use receipt::{block_bloom, Receipt, ReceiptWithBloom};
pub use transaction::{
    AccessList, AccessListItem, Signature, Transaction, TransactionSigned, TxEip1559, TxEip2930,
    TxLegacy, EIP1559_TX_TYPE_ID, EIP2930_TX_TYPE_ID, LEGACY_TX_TYPE_ID,
};

pub use alloy_primitives::{
    self, address, b256, Address, BlockNumber, Bloom, Bytes, ChainId, TxHash, B256, U256,
};

/// Re-exported so downstream crates needing wide fixed-width integers (e.g. the 512-bit
/// upfront-cost check in `execore-revm-executor`) share a single `ruint` instance with
/// `alloy-primitives`.
pub use alloy_primitives::ruint;
