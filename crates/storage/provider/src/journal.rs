//! Per-call-frame reversibility for [`crate::state::CacheState`] (§4.C, §9's journaled mutation
//! model): every mutating capability pushes the value it overwrote onto a flat [`JournalEntry`]
//! stack, and a checkpoint is just an index into that stack. Reverting to a checkpoint pops and
//! undoes entries back to it — the same approach silkworm's `IntraBlockState` and reth's
//! `revm::JournaledState` both take, in place of snapshotting the whole map per frame.

use alloy_primitives::{Address, B256};

#[derive(Debug, Clone)]
pub enum JournalEntry {
    BalanceChanged { address: Address, prior: alloy_primitives::U256 },
    NonceChanged { address: Address, prior: u64 },
    CodeChanged { address: Address, prior: Option<B256> },
    StorageChanged { address: Address, key: B256, prior: B256 },
    AccessAccountAdded { address: Address },
    AccessStorageAdded { address: Address, key: B256 },
    RefundChanged { prior: u64 },
    SuicideAdded { address: Address },
    TouchedAdded { address: Address },
    LogAppended,
}
