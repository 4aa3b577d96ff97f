//! The flat error taxonomy the execution core returns by value (never panics, never throws).
//!
//! This mirrors `reth-execution-errors`'s `BlockValidationError`/`BlockExecutionError` split but
//! collapses an explicit success sentinel into the idiomatic `Result<T, ValidationError>` — Rust
//! has no use for a dedicated "ok" variant inside the enum itself.

use alloy_primitives::{BlockNumber, Bloom, B256};
use thiserror::Error;

/// Every way a transaction, header or block can fail validation or execution.
///
/// Variants are grouped by when the check runs: pre-validation (stateless, no World State
/// access), intrinsic-to-execution (require World State), post-execution (computed after the
/// whole block has run) and structural (header/body shape, independent of state).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // --- pre-validation ---
    #[error("invalid transaction signature")]
    InvalidSignature,
    #[error("transaction chain id {got} does not match configured chain id {expected}")]
    WrongChainId { got: u64, expected: u64 },
    #[error("transaction type {0} is not yet active at this revision")]
    UnsupportedTransactionType(u8),
    #[error("max priority fee per gas ({priority_fee}) is greater than max fee per gas ({max_fee})")]
    MaxPriorityFeeGreaterThanMax { priority_fee: u128, max_fee: u128 },
    #[error("max fee per gas ({max_fee}) is less than the block's base fee ({base_fee})")]
    MaxFeeLessThanBase { max_fee: u128, base_fee: u64 },
    #[error("intrinsic gas {intrinsic_gas} exceeds transaction gas limit {gas_limit}")]
    IntrinsicGas { intrinsic_gas: u64, gas_limit: u64 },

    // --- intrinsic-to-execution ---
    #[error("transaction has no recovered sender")]
    MissingSender,
    #[error("sender nonce {got} does not match expected nonce {expected}")]
    WrongNonce { got: u64, expected: u64 },
    #[error("sender balance is insufficient to cover upfront transaction cost")]
    InsufficientFunds,
    #[error(
        "transaction gas limit {transaction_gas_limit} exceeds the block's remaining gas \
         {block_available_gas}"
    )]
    BlockGasLimitExceeded { transaction_gas_limit: u64, block_available_gas: u64 },

    // --- post-execution ---
    #[error("block gas used {got} does not match header gas used {expected}")]
    WrongBlockGas { got: u64, expected: u64 },
    #[error("computed receipts root {got} does not match header receipts root {expected}")]
    WrongReceiptsRoot { got: B256, expected: B256 },
    #[error("computed logs bloom {got:?} does not match header logs bloom {expected:?}")]
    WrongLogsBloom { got: Box<Bloom>, expected: Box<Bloom> },
    #[error("computed post-state root {got} does not match header state root {expected}")]
    WrongStateRoot { got: B256, expected: B256 },

    // --- structural ---
    #[error("invalid ommer header at index {index}")]
    InvalidOmmerHeader { index: usize },
    #[error("block has {got} ommers, more than the maximum of {max}")]
    TooManyOmmers { got: usize, max: usize },
    #[error("parent of block {number} ({parent_hash}) is unknown")]
    UnknownParent { number: BlockNumber, parent_hash: B256 },
}

/// Failures reading from or writing to the backing key-value store (§6).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("key not found in table {table}")]
    NotFound { table: &'static str },
    #[error("corrupt data in table {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
    #[error("missing change set for block {0}, unwind cannot proceed")]
    MissingChangeSet(BlockNumber),
}

/// Top-level error returned by the Execution Processor and Blockchain Driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockExecutionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The underlying `Vm` implementation reported an error distinct from a normal
    /// `Revert`/`OutOfGas` status (e.g. a host callback failure).
    #[error("EVM reported an unrecoverable error for transaction {hash}: {message}")]
    Vm { hash: B256, message: String },
    /// A previously-validated canonical block failed to commit; the store is now in an unknown
    /// state and the caller must treat this as fatal (see [`BlockExecutionError::is_fatal`]).
    #[error("failed to commit block {number} to the backing store: {inner}")]
    CanonicalCommit { number: BlockNumber, inner: String },
    /// Unwinding to a common ancestor failed, e.g. because a change set was missing.
    #[error("failed to unwind to block {number}: {inner}")]
    CanonicalRevert { number: BlockNumber, inner: String },
    #[error(
        "block {new_block} does not connect to canonical tip {canonical_tip} (common ancestor \
         search failed)"
    )]
    AppendChainDoesntConnect { canonical_tip: BlockNumber, new_block: BlockNumber },
}

impl BlockExecutionError {
    /// Returns `true` for unrecoverable store-level failures, as opposed to ordinary validation
    /// rejections which leave the store untouched and are safe to retry against a different
    /// block.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CanonicalCommit { .. } | Self::CanonicalRevert { .. })
    }
}
