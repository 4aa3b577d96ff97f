use alloy_primitives::U256;
use execore_chainspec::{ChainSpec, Hardfork};
use execore_errors::ValidationError;
use execore_primitives::{
    Block, BlockNumber, Header, TransactionSigned, EIP1559_TX_TYPE_ID, EIP2930_TX_TYPE_ID,
    LEGACY_TX_TYPE_ID,
};

use crate::gas::intrinsic_gas;

/// `secp256k1n / 2`, the upper bound EIP-2 places on a transaction's `s` value from Homestead
/// onward to rule out signature malleability.
const SECP256K1N_HALF: U256 = U256::from_be_bytes([
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
]);

/// The earliest revision at which each transaction type is legal.
fn min_revision_for_type(tx_type: u8) -> Option<Hardfork> {
    match tx_type {
        LEGACY_TX_TYPE_ID => Some(Hardfork::Frontier),
        EIP2930_TX_TYPE_ID => Some(Hardfork::Berlin),
        EIP1559_TX_TYPE_ID => Some(Hardfork::London),
        _ => None,
    }
}

/// Stateless transaction pre-validation (§4.B): signature malleability, chain-id match, type
/// legality at this revision, fee-field ordering, and intrinsic gas. Performs no World State
/// access — a transaction that passes here may still fail [`validate_transaction`] in the
/// processor once sender balance and nonce are available.
pub fn pre_validate_transaction(
    txn: &TransactionSigned,
    block_number: BlockNumber,
    chain_spec: &ChainSpec,
    base_fee_per_gas: Option<u64>,
) -> Result<(), ValidationError> {
    let revision = chain_spec.revision_for(block_number);

    if revision >= Hardfork::Homestead && txn.signature.s > SECP256K1N_HALF {
        return Err(ValidationError::InvalidSignature);
    }

    if let Some(tx_chain_id) = txn.transaction.chain_id() {
        if tx_chain_id != chain_spec.chain_id {
            return Err(ValidationError::WrongChainId {
                got: tx_chain_id,
                expected: chain_spec.chain_id,
            });
        }
    }

    let tx_type = txn.transaction.tx_type();
    match min_revision_for_type(tx_type) {
        Some(min_revision) if revision >= min_revision => {}
        _ => return Err(ValidationError::UnsupportedTransactionType(tx_type)),
    }

    if let Some(priority_fee) = txn.transaction.max_priority_fee_per_gas() {
        let max_fee = txn.transaction.max_fee_per_gas();
        if priority_fee > max_fee {
            return Err(ValidationError::MaxPriorityFeeGreaterThanMax { priority_fee, max_fee });
        }
    }

    if let Some(base_fee) = base_fee_per_gas {
        let max_fee = txn.transaction.max_fee_per_gas();
        if max_fee < base_fee as u128 {
            return Err(ValidationError::MaxFeeLessThanBase { max_fee, base_fee });
        }
    }

    let g0 = intrinsic_gas(
        &txn.transaction,
        revision >= Hardfork::Homestead,
        revision >= Hardfork::Istanbul,
    );
    if g0 > txn.transaction.gas_limit() {
        return Err(ValidationError::IntrinsicGas { intrinsic_gas: g0, gas_limit: txn.transaction.gas_limit() });
    }

    Ok(())
}

/// Maximum number of ommers (uncles) a block may include.
pub const MAX_OMMERS: usize = 2;
/// Maximum depth (in blocks) at which an ommer may be included.
pub const MAX_OMMER_DEPTH: u64 = 6;

/// Header-against-parent linkage check: `parent_hash` must match the hash of `parent` (computed
/// by the caller through the narrow hashing interface, §4.G) and `number` must be exactly one
/// past `parent.number`.
///
/// Gas-limit adjustment bounds and timestamp monotonicity are consensus rules too, but this
/// workspace's flat error taxonomy (§7) names no variant for either — `ValidationError`'s
/// structural group is exactly `InvalidOmmerHeader`/`TooManyOmmers`/`UnknownParent`. This
/// function is scoped to what that taxonomy can report; see DESIGN.md for the Open Question
/// this resolves.
pub fn pre_validate_header(
    header: &Header,
    parent: &Header,
    parent_hash: alloy_primitives::B256,
) -> Result<(), ValidationError> {
    if header.parent_hash != parent_hash || header.number != parent.number + 1 {
        return Err(ValidationError::UnknownParent {
            number: header.number,
            parent_hash: header.parent_hash,
        });
    }
    Ok(())
}

/// Ommer count and depth checks (§3 data model: "Max 2 ommers"; silkworm enforces depth ≤ 6).
/// Does not check `ommers_hash` itself — that is a keccak/RLP computation the caller supplies
/// (§4.G, consumed through a narrow interface).
pub fn validate_ommers(block: &Block, parent_block_number: BlockNumber) -> Result<(), ValidationError> {
    if block.ommers.len() > MAX_OMMERS {
        return Err(ValidationError::TooManyOmmers { got: block.ommers.len(), max: MAX_OMMERS });
    }
    let block_number = parent_block_number + 1;
    for (index, ommer) in block.ommers.iter().enumerate() {
        let too_old = ommer.number + MAX_OMMER_DEPTH < block_number;
        let too_new = ommer.number >= block_number;
        if too_old || too_new {
            return Err(ValidationError::InvalidOmmerHeader { index });
        }
    }
    Ok(())
}

/// Full pre-validation of a block's header and ommers (§4.B's `pre_validate_block`, minus body
/// hash checks which require the RLP/trie narrow interface and are performed by the caller).
pub fn pre_validate_block(
    block: &Block,
    parent: &Header,
    parent_hash: alloy_primitives::B256,
) -> Result<(), ValidationError> {
    pre_validate_header(&block.header, parent, parent_hash)?;
    validate_ommers(block, parent.number)
}
