use alloy_primitives::U256;
use execore_chainspec::{ChainSpec, Hardfork};
use execore_primitives::BlockNumber;

/// 5 ETH, the Frontier-era block reward.
pub const BLOCK_REWARD_FRONTIER: U256 = U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]);
/// 3 ETH, from Byzantium (EIP-649).
pub const BLOCK_REWARD_BYZANTIUM: U256 = U256::from_limbs([3_000_000_000_000_000_000, 0, 0, 0]);
/// 2 ETH, from Constantinople (EIP-1234).
pub const BLOCK_REWARD_CONSTANTINOPLE: U256 = U256::from_limbs([2_000_000_000_000_000_000, 0, 0, 0]);

/// The base per-block reward at `block_number`, or `None` if this revision pays no block reward
/// at all (the Merge and later — reward issuance moves to the consensus layer).
///
/// Mirrors `reth_consensus_common::calc::base_block_reward`, restricted to the block/ommer
/// reward terms this workspace models (no withdrawals, no beacon-chain issuance — those are
/// post-Merge additions outside this workspace's revision list).
pub fn base_block_reward(chain_spec: &ChainSpec, block_number: BlockNumber) -> Option<U256> {
    let revision = chain_spec.revision_for(block_number);
    if revision >= Hardfork::Merge {
        return None;
    }
    Some(if revision >= Hardfork::Constantinople {
        BLOCK_REWARD_CONSTANTINOPLE
    } else if revision >= Hardfork::Byzantium {
        BLOCK_REWARD_BYZANTIUM
    } else {
        BLOCK_REWARD_FRONTIER
    })
}

/// The reward paid to an ommer's own beneficiary: `((8 + ommer.number - block.number) * base) /
/// 8`, i.e. `base * (8 - depth) / 8` where `depth = block.number - ommer.number`.
pub fn ommer_reward(base_block_reward: U256, block_number: BlockNumber, ommer_number: BlockNumber) -> U256 {
    let depth = block_number.saturating_sub(ommer_number);
    let factor = 8u64.saturating_sub(depth);
    base_block_reward.saturating_mul(U256::from(factor)) / U256::from(8u64)
}

/// The reward paid to the block's own beneficiary: the base reward plus `base / 32` for each
/// included ommer (max 2 per §3).
pub fn block_reward(base_block_reward: U256, ommer_count: usize) -> U256 {
    base_block_reward + base_block_reward / U256::from(32u64) * U256::from(ommer_count as u64)
}
