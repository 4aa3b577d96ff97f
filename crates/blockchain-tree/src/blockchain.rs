//! The Blockchain Driver (§4.F): `insert_block` and its reorg machinery, resolved against
//! `silkworm::Blockchain` (`core/silkworm/chain/blockchain.hpp`) — same member list
//! (`bad_blocks_`, `canonical_ancestor`, `intermediate_chain`), same eight-step `insert_block`,
//! generalized to this workspace's `CacheState`/`Vm`/`RootHasher` seams instead of a concrete
//! `evmc_vm`/in-process trie.
//!
//! Scoped, per SPEC_FULL.md, to a single linear canonical chain plus reorg: there is no resident
//! side-chain tree. A competing block that does not beat the canonical tip's total difficulty is
//! rejected outright rather than buffered, since executing it would require state this instance
//! does not keep around for chains it doesn't serve.

use std::collections::{BTreeMap, HashMap};

use alloy_primitives::{Address, B256, U256};
use execore_chainspec::ChainSpec;
use execore_consensus_common::pre_validate_block;
use execore_errors::{BlockExecutionError, ProviderError, ValidationError};
use execore_primitives::{Block, BlockNumHash, Header, Receipt};
use execore_provider::{decode_account_change_set_value, CacheState};
use execore_revm_executor::{ExecuteAndWriteBlockError, ExecutionProcessor, Vm};
use execore_storage_api::{Cursor, Database, Table};
use execore_trie_common::RootHasher;

use crate::source::BlockSource;

/// The non-`Copy`, non-cloneable owner of a [`CacheState`] (§5: "exclusively owned by a single
/// `Blockchain` instance") that integrates candidate blocks into a canonical chain.
///
/// Holds `bad_blocks` (§4.F's `bad_blocks_`) and an in-memory `canonical`/`total_difficulty`
/// index mirroring `Table::CanonicalHeaders`, kept as a cache over the same data the backing
/// store already durably holds.
pub struct Blockchain {
    state: CacheState,
    chain_spec: ChainSpec,
    vm: Box<dyn Vm>,
    trie: Box<dyn RootHasher>,

    bad_blocks: HashMap<B256, BlockExecutionError>,
    canonical: BTreeMap<u64, B256>,
    total_difficulty: HashMap<B256, U256>,
    tip: BlockNumHash,

    /// The most recently integrated block's receipts, mirroring silkworm's `receipts_` buffer.
    receipts: Vec<Receipt>,
}

impl Blockchain {
    /// Seeds a new instance at `genesis`, whose allocation `state` must already reflect (§4.F:
    /// "Seeded with a genesis Block whose allocation the State already reflects").
    pub fn new(
        state: CacheState,
        chain_spec: ChainSpec,
        vm: Box<dyn Vm>,
        trie: Box<dyn RootHasher>,
        genesis: &Block,
        genesis_hash: B256,
    ) -> Result<Self, BlockExecutionError> {
        let mut blockchain = Self {
            state,
            chain_spec,
            vm,
            trie,
            bad_blocks: HashMap::new(),
            canonical: BTreeMap::new(),
            total_difficulty: HashMap::new(),
            tip: BlockNumHash::new(genesis.header.number, genesis_hash),
            receipts: Vec::new(),
        };
        blockchain.canonical.insert(genesis.header.number, genesis_hash);
        blockchain.total_difficulty.insert(genesis_hash, genesis.header.difficulty);
        blockchain.write_canonical_marker(genesis.header.number, genesis_hash)?;
        Ok(blockchain)
    }

    pub fn tip(&self) -> BlockNumHash {
        self.tip
    }

    pub fn canonical_hash(&self, number: u64) -> Option<B256> {
        self.canonical.get(&number).copied()
    }

    pub fn state(&mut self) -> &mut CacheState {
        &mut self.state
    }

    pub fn bad_block_reason(&self, hash: B256) -> Option<&BlockExecutionError> {
        self.bad_blocks.get(&hash)
    }

    /// The receipts produced by the most recently integrated block.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// `insert_block(block, check_state_root)` (§4.F), all eight steps. `total_difficulty` is the
    /// cumulative difficulty of `block`'s chain, supplied by the caller — the Yellow Paper does
    /// not carry it on the header itself, and silkworm's own `BlockWithHash`/`TotalDifficulty`
    /// pairing treats it the same way.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_block(
        &mut self,
        block: &Block,
        total_difficulty: U256,
        check_state_root: bool,
        source: &dyn BlockSource,
        hash_header: &impl Fn(&Header) -> B256,
        hash_address: &impl Fn(Address) -> B256,
        hash_storage_key: &impl Fn(B256) -> B256,
    ) -> Result<(), BlockExecutionError> {
        // Step 1
        let hash = hash_header(&block.header);
        if let Some(cached) = self.bad_blocks.get(&hash) {
            return Err(cached.clone());
        }

        let result = self.try_insert_block(
            block,
            hash,
            total_difficulty,
            check_state_root,
            source,
            hash_header,
            hash_address,
            hash_storage_key,
        );
        if let Err(err) = &result {
            tracing::debug!(target: "blockchain", number = block.header.number, ?hash, ?err, "rejecting block");
            self.bad_blocks.insert(hash, err.clone());
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn try_insert_block(
        &mut self,
        block: &Block,
        hash: B256,
        total_difficulty: U256,
        check_state_root: bool,
        source: &dyn BlockSource,
        hash_header: &impl Fn(&Header) -> B256,
        hash_address: &impl Fn(Address) -> B256,
        hash_storage_key: &impl Fn(B256) -> B256,
    ) -> Result<(), BlockExecutionError> {
        // Step 2
        let parent = source.header(block.header.parent_hash).ok_or_else(|| {
            BlockExecutionError::Validation(ValidationError::UnknownParent {
                number: block.header.number,
                parent_hash: block.header.parent_hash,
            })
        })?;
        pre_validate_block(block, &parent, block.header.parent_hash)?;

        // Step 3
        let tip = self.tip;

        // Step 4
        let ancestor = self.canonical_ancestor(&block.header, source, hash_header)?;

        // Step 6 (gathered unconditionally; empty whenever `block` simply extends the tip)
        let new_branch = self.intermediate_chain(block, ancestor, source)?;

        let mut reorged = false;
        let mut original_chain = Vec::new();

        // Step 5
        if ancestor < tip.number {
            let canonical_total_difficulty = *self.total_difficulty.get(&tip.hash).unwrap_or(&U256::ZERO);
            if total_difficulty <= canonical_total_difficulty {
                return Err(BlockExecutionError::AppendChainDoesntConnect {
                    canonical_tip: tip.number,
                    new_block: block.header.number,
                });
            }
            original_chain = self.canonical_chain_blocks(ancestor + 1, tip.number, source)?;
            self.unwind_last_changes(ancestor, tip.number)?;
            self.re_execute_canonical_chain(&new_branch, ancestor, hash_header)?;
            reorged = true;
        }

        // Step 7
        let execute_result = {
            let mut processor = ExecutionProcessor::new(block, &mut self.state, self.vm.as_ref(), &self.chain_spec);
            processor.execute_and_write_block(self.trie.as_ref())
        };

        match execute_result {
            Ok(receipts) => {
                self.receipts = receipts;
                self.canonical.insert(block.header.number, hash);
                self.total_difficulty.insert(hash, total_difficulty);
                self.write_canonical_marker(block.header.number, hash)?;
                self.tip = BlockNumHash::new(block.header.number, hash);
            }
            Err(err) => {
                self.state.discard_block_changes();
                if reorged {
                    self.unwind_last_changes(ancestor, block.header.number - 1)?;
                    self.re_execute_canonical_chain(&original_chain, ancestor, hash_header)?;
                    self.tip = tip;
                }
                return Err(execute_error_into_block_error(err));
            }
        }

        // Step 8
        if check_state_root {
            let computed = self.state.state_root(hash_address, hash_storage_key, self.trie.as_ref());
            if computed != block.header.state_root {
                self.unwind_last_changes(ancestor, block.header.number)?;
                if reorged {
                    self.re_execute_canonical_chain(&original_chain, ancestor, hash_header)?;
                }
                self.tip = tip;
                return Err(BlockExecutionError::Validation(ValidationError::WrongStateRoot {
                    got: computed,
                    expected: block.header.state_root,
                }));
            }
        }

        tracing::debug!(target: "blockchain", number = block.header.number, ?hash, "block integrated as canonical");
        Ok(())
    }

    /// `canonical_ancestor(header, hash)` (§4.F): walks parent pointers from `header` until a
    /// block number already recorded as canonical is reached, returning that number. `A <=
    /// min(T, block.number)` falls out of the walk itself rather than being checked separately.
    fn canonical_ancestor(
        &self,
        header: &Header,
        source: &dyn BlockSource,
        hash_header: &impl Fn(&Header) -> B256,
    ) -> Result<u64, BlockExecutionError> {
        let mut current = header.clone();
        loop {
            if let Some(&canonical_hash) = self.canonical.get(&current.number) {
                if hash_header(&current) == canonical_hash {
                    return Ok(current.number);
                }
            }
            if current.number == 0 {
                return Err(BlockExecutionError::AppendChainDoesntConnect {
                    canonical_tip: 0,
                    new_block: header.number,
                });
            }
            current = source.header(current.parent_hash).ok_or(BlockExecutionError::AppendChainDoesntConnect {
                canonical_tip: current.number.saturating_sub(1),
                new_block: header.number,
            })?;
        }
    }

    /// `intermediate_chain(block.number, hash, ancestor)` (§4.F): the new branch's ancestors
    /// strictly between `ancestor` and `block`, gathered from `source` in ascending order.
    fn intermediate_chain(
        &self,
        new_block: &Block,
        ancestor: u64,
        source: &dyn BlockSource,
    ) -> Result<Vec<Block>, BlockExecutionError> {
        let mut chain = Vec::new();
        let mut current_hash = new_block.header.parent_hash;
        let mut current_number = new_block.header.number.saturating_sub(1);
        while current_number > ancestor {
            let block = source.block(current_hash).ok_or(BlockExecutionError::AppendChainDoesntConnect {
                canonical_tip: current_number,
                new_block: new_block.header.number,
            })?;
            current_hash = block.header.parent_hash;
            current_number = current_number.saturating_sub(1);
            chain.push(block);
        }
        chain.reverse();
        Ok(chain)
    }

    /// Fetches the currently-canonical blocks `from..=to` from `source`, used to restore the
    /// prior canonical chain if a reorg's new tip turns out to be invalid.
    fn canonical_chain_blocks(
        &self,
        from: u64,
        to: u64,
        source: &dyn BlockSource,
    ) -> Result<Vec<Block>, BlockExecutionError> {
        let mut blocks = Vec::new();
        for number in from..=to {
            let hash = *self
                .canonical
                .get(&number)
                .ok_or(BlockExecutionError::Provider(ProviderError::MissingChangeSet(number)))?;
            let block = source
                .block(hash)
                .ok_or(BlockExecutionError::AppendChainDoesntConnect { canonical_tip: number, new_block: number })?;
            blocks.push(block);
        }
        Ok(blocks)
    }

    /// `re_execute_canonical_chain(ancestor, tip)` (§4.F): replays `blocks` in order, expecting
    /// every one to succeed (they were already validated once, when first inserted), extending
    /// the canonical mapping and total-difficulty index as it goes.
    fn re_execute_canonical_chain(
        &mut self,
        blocks: &[Block],
        ancestor: u64,
        hash_header: &impl Fn(&Header) -> B256,
    ) -> Result<(), BlockExecutionError> {
        let ancestor_hash = *self.canonical.get(&ancestor).expect("ancestor is canonical by construction");
        let mut running_total_difficulty = *self.total_difficulty.get(&ancestor_hash).unwrap_or(&U256::ZERO);

        for block in blocks {
            running_total_difficulty += block.header.difficulty;
            let block_hash = hash_header(&block.header);

            let result = {
                let mut processor =
                    ExecutionProcessor::new(block, &mut self.state, self.vm.as_ref(), &self.chain_spec);
                processor.execute_and_write_block(self.trie.as_ref())
            };
            result.map_err(|err| BlockExecutionError::CanonicalRevert {
                number: block.header.number,
                inner: err.to_string(),
            })?;

            self.canonical.insert(block.header.number, block_hash);
            self.total_difficulty.insert(block_hash, running_total_difficulty);
            self.write_canonical_marker(block.header.number, block_hash)?;
        }
        Ok(())
    }

    /// `unwind_last_changes(ancestor, tip)` (§4.F): reverses every block `tip, tip-1, ...,
    /// ancestor+1`'s writes using its persisted change set.
    fn unwind_last_changes(&mut self, ancestor: u64, tip: u64) -> Result<(), BlockExecutionError> {
        for number in (ancestor + 1..=tip).rev() {
            self.unwind_one_block(number)?;
        }
        Ok(())
    }

    fn unwind_one_block(&mut self, number: u64) -> Result<(), BlockExecutionError> {
        let hash = self
            .canonical
            .remove(&number)
            .ok_or(BlockExecutionError::Provider(ProviderError::MissingChangeSet(number)))?;
        self.total_difficulty.remove(&hash);

        let block_key = number.to_be_bytes();

        let mut account_cursor = self.state.database().cursor(Table::AccountChangeSet);
        let mut account_entries = Vec::new();
        let mut entry = account_cursor.seek(&block_key);
        while let Some((key, value)) = entry {
            if !key.starts_with(block_key.as_slice()) {
                break;
            }
            account_entries.push((key, value));
            entry = account_cursor.next();
        }
        for (key, value) in &account_entries {
            let address = Address::from_slice(&key[8..28]);
            self.state.apply_unwind_account(address, decode_account_change_set_value(value));
        }
        for (key, _) in &account_entries {
            account_cursor.seek(key);
            account_cursor.erase();
        }

        let mut storage_cursor = self.state.database().cursor(Table::StorageChangeSet);
        let mut storage_entries = Vec::new();
        let mut entry = storage_cursor.seek(&block_key);
        while let Some((key, value)) = entry {
            if !key.starts_with(block_key.as_slice()) {
                break;
            }
            storage_entries.push((key, value));
            entry = storage_cursor.next();
        }
        for (key, value) in &storage_entries {
            let address = Address::from_slice(&key[8..28]);
            let storage_key = B256::from_slice(&key[28..60]);
            self.state.apply_unwind_storage(address, storage_key, B256::from_slice(value));
        }
        for (key, _) in &storage_entries {
            storage_cursor.seek(key);
            storage_cursor.erase();
        }

        self.state.database_mut().delete(Table::CanonicalHeaders, &block_key)?;
        Ok(())
    }

    fn write_canonical_marker(&mut self, number: u64, hash: B256) -> Result<(), BlockExecutionError> {
        self.state
            .database_mut()
            .put(Table::CanonicalHeaders, number.to_be_bytes().to_vec(), hash.as_slice().to_vec())
            .map_err(BlockExecutionError::from)
    }
}

fn execute_error_into_block_error(err: ExecuteAndWriteBlockError) -> BlockExecutionError {
    match err {
        ExecuteAndWriteBlockError::Validation(inner) => BlockExecutionError::Validation(inner),
        ExecuteAndWriteBlockError::Provider(inner) => BlockExecutionError::Provider(inner),
    }
}
