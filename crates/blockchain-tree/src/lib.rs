//! The Blockchain Driver (§4.F): the single owner of a [`execore_provider::CacheState`] that
//! integrates candidate blocks onto a canonical chain, replaying a reorg's unwind/replay sequence
//! against the narrow [`execore_revm_executor::Vm`]/[`execore_trie_common::RootHasher`] seams
//! rather than any concrete EVM or trie implementation.

mod blockchain;
mod source;

pub use blockchain::Blockchain;
pub use source::BlockSource;
