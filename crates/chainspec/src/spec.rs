use std::collections::BTreeMap;

use crate::hardfork::{ForkCondition, Hardfork};

/// Static per-chain parameters: the hard-fork activation schedule plus the handful of scalar
/// parameters (`chain_id`, the DAO extraction block) that gate fork-specific behavior in the
/// Execution Processor and Validation Primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    pub chain_id: u64,
    forks: BTreeMap<Hardfork, ForkCondition>,
    /// The block at which the DAO hardfork's irregular state change (§4.E step, scenario 6) is
    /// applied. `None` on chains that never forked (e.g. Ethereum Classic).
    pub dao_block: Option<u64>,
}

impl ChainSpec {
    /// The condition under which `fork` activates on this chain. Forks absent from the schedule
    /// are treated as [`ForkCondition::Never`].
    pub fn fork(&self, fork: Hardfork) -> ForkCondition {
        self.forks.get(&fork).copied().unwrap_or(ForkCondition::Never)
    }

    pub fn is_active_at_block(&self, fork: Hardfork, block_number: u64) -> bool {
        self.fork(fork).active_at_block(block_number)
    }

    /// The highest [`Hardfork`] active at `block_number`. Falls back to [`Hardfork::Frontier`]
    /// if nothing is configured to activate at or before genesis — every chain is at least
    /// Frontier once it exists.
    pub fn revision_for(&self, block_number: u64) -> Hardfork {
        Hardfork::ALL
            .into_iter()
            .rev()
            .find(|fork| self.is_active_at_block(*fork, block_number))
            .unwrap_or(Hardfork::Frontier)
    }

    pub fn builder() -> ChainSpecBuilder {
        ChainSpecBuilder::default()
    }
}

/// Builder for [`ChainSpec`], mirroring `reth-chainspec`'s own `ChainSpecBuilder`.
#[derive(Debug, Clone, Default)]
pub struct ChainSpecBuilder {
    chain_id: u64,
    forks: BTreeMap<Hardfork, ForkCondition>,
    dao_block: Option<u64>,
}

impl ChainSpecBuilder {
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_fork(mut self, fork: Hardfork, condition: ForkCondition) -> Self {
        self.forks.insert(fork, condition);
        self
    }

    /// Activates every fork up to and including `fork` at `block_number`, and every fork after it
    /// as [`ForkCondition::Never`] — a convenience for building specs that spend their whole
    /// lifetime on one revision, as most unit tests in this crate do.
    pub fn activated_through(mut self, fork: Hardfork, block_number: u64) -> Self {
        for candidate in Hardfork::ALL {
            if candidate <= fork {
                self.forks.insert(candidate, ForkCondition::Block(block_number));
            }
        }
        self
    }

    pub fn dao_block(mut self, block_number: u64) -> Self {
        self.dao_block = Some(block_number);
        self
    }

    pub fn build(self) -> ChainSpec {
        ChainSpec { chain_id: self.chain_id, forks: self.forks, dao_block: self.dao_block }
    }
}
