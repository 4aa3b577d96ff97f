//! Conversion from a `serde_json`-deserializable [`alloy_genesis::Genesis`] into a [`ChainSpec`],
//! for callers that want to load a chain's parameters from a `genesis.json` file the way
//! `reth_primitives::Genesis`/`ChainSpec::from_genesis` does, without this crate owning any CLI
//! or file-loading surface (config loading is out of scope — see DESIGN.md).

use alloy_genesis::{ChainConfig, Genesis};

use crate::hardfork::{ForkCondition, Hardfork};
use crate::spec::{ChainSpec, ChainSpecBuilder};

/// Builds a [`ChainSpec`] from a genesis file's `config` block, mapping each named fork-block
/// field to this workspace's [`Hardfork`] schedule. Forks the `ChainConfig` has no field for
/// (there is no EIP-155/EIP-158 split point distinct from the Spurious Dragon bundle here) fall
/// out of the nearest field that actually gates the same fork.
pub fn chain_spec_from_genesis(genesis: &Genesis) -> ChainSpec {
    let config = &genesis.config;
    let mut builder = ChainSpecBuilder::default().chain_id(config.chain_id).with_fork(Hardfork::Frontier, ForkCondition::Block(0));

    builder = with_block_fork(builder, Hardfork::Homestead, config.homestead_block);
    builder = with_block_fork(builder, Hardfork::Dao, config.dao_fork_block);
    builder = with_block_fork(builder, Hardfork::Tangerine, config.eip150_block);
    builder = with_block_fork(builder, Hardfork::SpuriousDragon, config.eip158_block);
    builder = with_block_fork(builder, Hardfork::Byzantium, config.byzantium_block);
    builder = with_block_fork(builder, Hardfork::Constantinople, config.constantinople_block);
    builder = with_block_fork(builder, Hardfork::Petersburg, config.petersburg_block);
    builder = with_block_fork(builder, Hardfork::Istanbul, config.istanbul_block);
    builder = with_block_fork(builder, Hardfork::Berlin, config.berlin_block);
    builder = with_block_fork(builder, Hardfork::London, config.london_block);
    builder = with_block_fork(builder, Hardfork::Merge, config.merge_netsplit_block);

    if let Some(dao_block) = config.dao_fork_block {
        builder = builder.dao_block(dao_block);
    }

    builder.build()
}

fn with_block_fork(builder: ChainSpecBuilder, fork: Hardfork, block: Option<u64>) -> ChainSpecBuilder {
    match block {
        Some(block_number) => builder.with_fork(fork, ForkCondition::Block(block_number)),
        None => builder,
    }
}

/// Helper kept alongside the conversion for callers that only have the raw JSON text on hand
/// (`genesis.json` as shipped by most clients), mirroring `reth`'s `Genesis: Deserialize` usage.
pub fn chain_spec_from_genesis_json(json: &str) -> serde_json::Result<ChainSpec> {
    let genesis: Genesis = serde_json::from_str(json)?;
    Ok(chain_spec_from_genesis(&genesis))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_genesis_json() -> &'static str {
        r#"{
            "config": {
                "chainId": 1337,
                "homesteadBlock": 0,
                "eip150Block": 0,
                "eip158Block": 0,
                "byzantiumBlock": 0,
                "constantinopleBlock": 0,
                "petersburgBlock": 0,
                "istanbulBlock": 0,
                "berlinBlock": 0,
                "londonBlock": 0
            },
            "difficulty": "0x1",
            "gasLimit": "0x1c9c380",
            "alloc": {}
        }"#
    }

    #[test]
    fn genesis_json_maps_fork_blocks_onto_the_schedule() {
        let spec = chain_spec_from_genesis_json(sample_genesis_json()).unwrap();
        assert_eq!(spec.chain_id, 1337);
        assert_eq!(spec.revision_for(0), Hardfork::London);
        assert_eq!(spec.fork(Hardfork::Dao), ForkCondition::Never);
        assert_eq!(spec.dao_block, None);
    }

    #[test]
    fn dao_fork_block_populates_both_the_schedule_and_the_scalar() {
        let mut genesis = Genesis::default();
        genesis.config.chain_id = 1;
        genesis.config.homestead_block = Some(0);
        genesis.config.dao_fork_block = Some(42);
        let spec = chain_spec_from_genesis(&genesis);
        assert!(spec.is_active_at_block(Hardfork::Dao, 42));
        assert_eq!(spec.dao_block, Some(42));
    }
}
