//! Static per-chain parameters and the hard-fork activation schedule (component A of the
//! execution core).
//!
//! Every fork-conditional decision elsewhere in the workspace routes through [`ChainSpec`] —
//! there is no ambient global fork table or process-wide singleton; a [`ChainSpec`] is always
//! passed by reference into the `consensus-common` validation primitives and the
//! `revm-executor` processor, per §9's "Global fork table" design note.

mod genesis;
mod hardfork;
mod spec;

pub use genesis::{chain_spec_from_genesis, chain_spec_from_genesis_json};
pub use hardfork::{ForkCondition, Hardfork};
pub use spec::{ChainSpec, ChainSpecBuilder};

use once_cell::sync::Lazy;

/// Ethereum mainnet's fork schedule, for tests and default wiring — mirrors `reth_chainspec`'s
/// own `MAINNET` static.
pub static MAINNET: Lazy<ChainSpec> = Lazy::new(|| {
    ChainSpec::builder()
        .chain_id(1)
        .with_fork(Hardfork::Frontier, ForkCondition::Block(0))
        .with_fork(Hardfork::Homestead, ForkCondition::Block(1_150_000))
        .with_fork(Hardfork::Dao, ForkCondition::Block(1_920_000))
        .with_fork(Hardfork::Tangerine, ForkCondition::Block(2_463_000))
        .with_fork(Hardfork::SpuriousDragon, ForkCondition::Block(2_675_000))
        .with_fork(Hardfork::Byzantium, ForkCondition::Block(4_370_000))
        .with_fork(Hardfork::Constantinople, ForkCondition::Block(7_280_000))
        .with_fork(Hardfork::Petersburg, ForkCondition::Block(7_280_000))
        .with_fork(Hardfork::Istanbul, ForkCondition::Block(9_069_000))
        .with_fork(Hardfork::Berlin, ForkCondition::Block(12_244_000))
        .with_fork(Hardfork::London, ForkCondition::Block(12_965_000))
        .with_fork(Hardfork::Merge, ForkCondition::Block(15_537_394))
        .dao_block(1_920_000)
        .build()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_revision_for_tracks_fork_boundaries() {
        assert_eq!(MAINNET.revision_for(0), Hardfork::Frontier);
        assert_eq!(MAINNET.revision_for(1_150_000), Hardfork::Homestead);
        assert_eq!(MAINNET.revision_for(4_370_000), Hardfork::Byzantium);
        assert_eq!(MAINNET.revision_for(12_965_000), Hardfork::London);
        assert_eq!(MAINNET.revision_for(20_000_000), Hardfork::Merge);
    }

    #[test]
    fn dao_block_matches_dao_fork_activation() {
        assert_eq!(MAINNET.dao_block, Some(1_920_000));
        assert!(MAINNET.is_active_at_block(Hardfork::Dao, 1_920_000));
    }

    #[test]
    fn unconfigured_fork_is_never_active() {
        let spec = ChainSpec::builder().chain_id(1337).build();
        assert_eq!(spec.fork(Hardfork::London), ForkCondition::Never);
        assert_eq!(spec.revision_for(100), Hardfork::Frontier);
    }
}
