//! The Block Source (§6): the external collaborator `insert_block` consults for header/body
//! lookups by hash — ancestor walks, sidechain promotion, and reorg restoration all read through
//! this seam rather than owning a resident copy of every block ever seen, matching
//! `silkworm::Blockchain`'s reliance on its caller-supplied `db::Buffer` for the same lookups.

use alloy_primitives::B256;
use execore_primitives::{Block, Header};

/// Produces `Block`/`Header` values by hash, with `from` already recovered on every transaction
/// where the source was able to (the processor re-derives lazily otherwise, per
/// [`execore_primitives::TransactionSigned::from_or_recover`]).
pub trait BlockSource {
    fn block(&self, hash: B256) -> Option<Block>;
    fn header(&self, hash: B256) -> Option<Header>;
}
