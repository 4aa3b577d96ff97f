//! The World State (§4.C): `CacheState`, an in-memory overlay over a [`StateProvider`] backed by
//! a [`Database`] for persistence. Exposes the full capability surface the `Vm`/`Host` boundary
//! (§9) and the Execution Processor (§4.E) need, plus the journal/checkpoint machinery a nested
//! `CALL`/`CREATE` frame uses to undo its own mutations without disturbing its caller's.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rlp::RlpEncodable;
use execore_errors::ProviderError;
use execore_primitives::{Account, Log};
use execore_storage_api::{Database, StateProvider, Table};
use execore_trie_common::RootHasher;

use crate::codec::{decode_account, decode_account_opt, encode_account, encode_account_opt};
use crate::journal::JournalEntry;

#[derive(Debug, Clone, Default)]
struct AccountState {
    info: Account,
    storage: HashMap<B256, B256>,
}

/// The prior value of every account/storage slot touched since the last [`CacheState::write_to_db`],
/// keyed the way silkworm's `db::AccountChanges`/`StorageChanges` are: one entry per address (or
/// per `(address, key)`) recording its value as of the *start* of the block, regardless of how
/// many times it was mutated since.
#[derive(Debug, Clone, Default)]
struct BlockChangeSet {
    accounts: HashMap<Address, Option<Account>>,
    storage: HashMap<(Address, B256), B256>,
}

/// The consensus account leaf stored in the state trie: `rlp([nonce, balance, storage_root,
/// code_hash])`. Distinct from [`crate::codec`]'s plain-state encoding, which this crate alone
/// reads back.
#[derive(RlpEncodable)]
struct TrieAccount {
    nonce: u64,
    balance: U256,
    storage_root: B256,
    code_hash: B256,
}

/// The execution core's single mutable view of account and storage state (§4.C).
///
/// Not `Sync`: a `CacheState` is owned exclusively by one `Blockchain` (§5), so every accessor
/// here takes `&mut self` even where a read-only signature would otherwise suffice, reflecting
/// that reads materialize entries into the overlay (`ensure_loaded`) as a side effect.
pub struct CacheState {
    db: Box<dyn Database>,
    provider: Box<dyn StateProvider>,

    accounts: HashMap<Address, AccountState>,
    codes: HashMap<B256, Bytes>,
    pending_codes: HashSet<B256>,

    access_accounts: HashSet<Address>,
    access_storage: HashSet<(Address, B256)>,
    self_destructs: HashSet<Address>,
    touched: HashSet<Address>,
    refund: u64,
    logs: Vec<Log>,

    journal: Vec<JournalEntry>,
    checkpoints: Vec<usize>,

    block_changes: BlockChangeSet,
}

impl CacheState {
    pub fn new(db: Box<dyn Database>, provider: Box<dyn StateProvider>) -> Self {
        Self {
            db,
            provider,
            accounts: HashMap::new(),
            codes: HashMap::new(),
            pending_codes: HashSet::new(),
            access_accounts: HashSet::new(),
            access_storage: HashSet::new(),
            self_destructs: HashSet::new(),
            touched: HashSet::new(),
            refund: 0,
            logs: Vec::new(),
            journal: Vec::new(),
            checkpoints: Vec::new(),
            block_changes: BlockChangeSet::default(),
        }
    }

    /// Inserts an account directly into the overlay, bypassing the journal and the change-set
    /// buffer. Used once, to seed genesis allocation before the first block is ever executed.
    pub fn seed_account(&mut self, address: Address, account: Account) {
        self.accounts.entry(address).or_default().info = account;
    }

    pub fn seed_storage(&mut self, address: Address, key: B256, value: B256) {
        self.accounts.entry(address).or_default().storage.insert(key, value);
    }

    pub fn seed_code(&mut self, code_hash: B256, code: Bytes) {
        self.codes.insert(code_hash, code);
    }

    fn ensure_loaded(&mut self, address: Address) {
        if self.accounts.contains_key(&address) {
            return;
        }
        let info = self.provider.basic_account(address).unwrap_or(None).unwrap_or_default();
        self.accounts.insert(address, AccountState { info, storage: HashMap::new() });
    }

    fn load(&mut self, address: Address) -> &AccountState {
        self.ensure_loaded(address);
        self.accounts.get(&address).expect("just loaded")
    }

    fn load_mut(&mut self, address: Address) -> &mut AccountState {
        self.ensure_loaded(address);
        self.accounts.get_mut(&address).expect("just loaded")
    }

    fn record_block_account_touch(&mut self, address: Address) {
        if self.block_changes.accounts.contains_key(&address) {
            return;
        }
        let prior = self.accounts.get(&address).map(|state| state.info);
        let prior = match prior {
            Some(account) => Some(account),
            None => self.provider.basic_account(address).unwrap_or(None),
        };
        self.block_changes.accounts.insert(address, prior);
    }

    fn record_block_storage_touch(&mut self, address: Address, key: B256, prior: B256) {
        self.block_changes.storage.entry((address, key)).or_insert(prior);
    }

    fn touch(&mut self, address: Address) {
        if self.touched.insert(address) {
            self.journal.push(JournalEntry::TouchedAdded { address });
        }
    }

    // --- §4.C capability surface ---

    pub fn get_balance(&mut self, address: Address) -> U256 {
        self.load(address).info.balance
    }

    pub fn add_to_balance(&mut self, address: Address, amount: U256) {
        self.record_block_account_touch(address);
        let prior = self.load(address).info.balance;
        self.load_mut(address).info.balance = prior.saturating_add(amount);
        self.journal.push(JournalEntry::BalanceChanged { address, prior });
        self.touch(address);
    }

    pub fn subtract_from_balance(&mut self, address: Address, amount: U256) {
        self.record_block_account_touch(address);
        let prior = self.load(address).info.balance;
        self.load_mut(address).info.balance = prior.saturating_sub(amount);
        self.journal.push(JournalEntry::BalanceChanged { address, prior });
        self.touch(address);
    }

    pub fn get_nonce(&mut self, address: Address) -> u64 {
        self.load(address).info.nonce
    }

    pub fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.record_block_account_touch(address);
        let prior = self.load(address).info.nonce;
        self.load_mut(address).info.nonce = nonce;
        self.journal.push(JournalEntry::NonceChanged { address, prior });
        self.touch(address);
    }

    pub fn get_code_hash(&mut self, address: Address) -> B256 {
        self.load(address).info.bytecode_hash.unwrap_or(Account::EMPTY_CODE_HASH)
    }

    pub fn get_code(&mut self, address: Address) -> Bytes {
        let hash = self.get_code_hash(address);
        if hash == Account::EMPTY_CODE_HASH {
            return Bytes::new();
        }
        if let Some(code) = self.codes.get(&hash) {
            return code.clone();
        }
        let code = self.provider.code_by_hash(hash).unwrap_or(None).unwrap_or_default();
        self.codes.insert(hash, code.clone());
        code
    }

    /// Installs `code` under `code_hash` and points `address` at it. Not part of the World
    /// State's originally enumerated capability list, but required for the `Vm`/`Host` boundary
    /// to support `CREATE` — there is no other seam through which newly deployed bytecode could
    /// enter the World State.
    pub fn set_code(&mut self, address: Address, code_hash: B256, code: Bytes) {
        self.record_block_account_touch(address);
        let prior = self.load(address).info.bytecode_hash;
        self.load_mut(address).info.bytecode_hash = Some(code_hash);
        self.codes.insert(code_hash, code);
        self.pending_codes.insert(code_hash);
        self.journal.push(JournalEntry::CodeChanged { address, prior });
        self.touch(address);
    }

    pub fn get_storage(&mut self, address: Address, key: B256) -> B256 {
        self.ensure_loaded(address);
        if let Some(value) = self.accounts.get(&address).expect("just loaded").storage.get(&key) {
            return *value;
        }
        let value = self.provider.storage(address, key).unwrap_or(B256::ZERO);
        self.accounts.get_mut(&address).expect("just loaded").storage.insert(key, value);
        value
    }

    pub fn set_storage(&mut self, address: Address, key: B256, value: B256) {
        let prior = self.get_storage(address, key);
        self.record_block_account_touch(address);
        self.record_block_storage_touch(address, key, prior);
        self.accounts.get_mut(&address).expect("just loaded").storage.insert(key, value);
        self.journal.push(JournalEntry::StorageChanged { address, key, prior });
        self.touch(address);
    }

    /// Marks `address` warm, returning whether it was previously cold (EIP-2929).
    pub fn access_account(&mut self, address: Address) -> bool {
        let was_cold = self.access_accounts.insert(address);
        if was_cold {
            self.journal.push(JournalEntry::AccessAccountAdded { address });
        }
        was_cold
    }

    pub fn access_storage(&mut self, address: Address, key: B256) -> bool {
        let was_cold = self.access_storage.insert((address, key));
        if was_cold {
            self.journal.push(JournalEntry::AccessStorageAdded { address, key });
        }
        was_cold
    }

    /// Transfers `address`'s whole balance to `beneficiary` and marks `address` for removal at
    /// the next [`CacheState::destruct_suicides`] call.
    pub fn record_suicide(&mut self, address: Address, beneficiary: Address) {
        if address != beneficiary {
            let balance = self.get_balance(address);
            self.subtract_from_balance(address, balance);
            self.add_to_balance(beneficiary, balance);
        }
        if self.self_destructs.insert(address) {
            self.journal.push(JournalEntry::SuicideAdded { address });
        }
    }

    /// Removes every self-destructed account's state, replacing it with the empty account rather
    /// than deleting the overlay entry outright — otherwise a later read within the same block
    /// would fall through to the (stale, pre-destruct) provider value instead of seeing it as
    /// gone.
    pub fn destruct_suicides(&mut self) {
        let addresses: Vec<Address> = self.self_destructs.iter().copied().collect();
        for address in addresses {
            self.record_block_account_touch(address);
            self.accounts.insert(address, AccountState::default());
        }
        self.self_destructs.clear();
    }

    /// Removes every touched account that ended the transaction empty (EIP-161, active from
    /// Spurious Dragon; the processor only calls this when that revision is active).
    pub fn destruct_touched_dead(&mut self) {
        let addresses: Vec<Address> = self.touched.iter().copied().collect();
        for address in addresses {
            if self.load(address).info.is_empty() {
                self.record_block_account_touch(address);
                self.accounts.insert(address, AccountState::default());
            }
        }
    }

    pub fn get_refund(&self) -> u64 {
        self.refund
    }

    pub fn add_refund(&mut self, delta: i64) -> u64 {
        let prior = self.refund;
        self.refund = (i64::try_from(self.refund).unwrap_or(i64::MAX) + delta).max(0) as u64;
        self.journal.push(JournalEntry::RefundChanged { prior });
        self.refund
    }

    pub fn push_log(&mut self, log: Log) {
        self.logs.push(log);
        self.journal.push(JournalEntry::LogAppended);
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Takes a checkpoint a `CALL`/`CREATE` frame can later revert to; just the current journal
    /// length.
    pub fn checkpoint(&mut self) -> usize {
        self.checkpoints.push(self.journal.len());
        self.journal.len()
    }

    pub fn revert_to_checkpoint(&mut self, checkpoint: usize) {
        while self.journal.len() > checkpoint {
            let entry = self.journal.pop().expect("loop condition guarantees an entry");
            self.undo(entry);
        }
        self.checkpoints.retain(|&c| c <= checkpoint);
    }

    fn undo(&mut self, entry: JournalEntry) {
        match entry {
            JournalEntry::BalanceChanged { address, prior } => {
                self.accounts.get_mut(&address).expect("journaled account stays loaded").info.balance = prior;
            }
            JournalEntry::NonceChanged { address, prior } => {
                self.accounts.get_mut(&address).expect("journaled account stays loaded").info.nonce = prior;
            }
            JournalEntry::CodeChanged { address, prior } => {
                self.accounts.get_mut(&address).expect("journaled account stays loaded").info.bytecode_hash = prior;
            }
            JournalEntry::StorageChanged { address, key, prior } => {
                self.accounts
                    .get_mut(&address)
                    .expect("journaled account stays loaded")
                    .storage
                    .insert(key, prior);
            }
            JournalEntry::AccessAccountAdded { address } => {
                self.access_accounts.remove(&address);
            }
            JournalEntry::AccessStorageAdded { address, key } => {
                self.access_storage.remove(&(address, key));
            }
            JournalEntry::RefundChanged { prior } => self.refund = prior,
            JournalEntry::SuicideAdded { address } => {
                self.self_destructs.remove(&address);
            }
            JournalEntry::TouchedAdded { address } => {
                self.touched.remove(&address);
            }
            JournalEntry::LogAppended => {
                self.logs.pop();
            }
        }
    }

    /// Discards the journal and clears the substate (access lists, self-destruct set, touched
    /// set, refund counter, log buffer) — called at the start of each transaction. Everything the
    /// prior transaction committed to the overlay becomes permanent at block scope: there is no
    /// further way to revert it once this is called.
    pub fn clear_journal_and_substate(&mut self) {
        self.journal.clear();
        self.checkpoints.clear();
        self.access_accounts.clear();
        self.access_storage.clear();
        self.self_destructs.clear();
        self.touched.clear();
        self.refund = 0;
        self.logs.clear();
    }

    /// Marks the end of a transaction. A no-op here: the change-set bookkeeping
    /// [`record_block_account_touch`]/[`record_block_storage_touch`] need happens inline at the
    /// point of mutation rather than being buffered and flushed at a transaction boundary, so
    /// there is nothing left to do by the time the processor calls this — kept for symmetry with
    /// the processor's own step numbering.
    pub fn finalize_transaction(&mut self) {}

    /// Persists every account/storage slot this block touched into `Table::PlainState`, their
    /// prior values into the change-set tables, and any newly deployed bytecode into
    /// `Table::Code`. Clears the block-level change buffer on success.
    pub fn write_to_db(&mut self, block_number: u64) -> Result<(), ProviderError> {
        let block_key = block_number.to_be_bytes();

        let touched_addresses: Vec<Address> = self.block_changes.accounts.keys().copied().collect();
        for (address, prior) in self.block_changes.accounts.drain() {
            let mut change_key = block_key.to_vec();
            change_key.extend_from_slice(address.as_slice());
            self.db.put(Table::AccountChangeSet, change_key, encode_account_opt(prior.as_ref()))?;
        }
        for ((address, key), prior) in self.block_changes.storage.drain() {
            let mut change_key = block_key.to_vec();
            change_key.extend_from_slice(address.as_slice());
            change_key.extend_from_slice(key.as_slice());
            self.db.put(Table::StorageChangeSet, change_key, prior.as_slice().to_vec())?;
        }

        for address in touched_addresses {
            let state = self.accounts.get(&address).expect("touched this block, still loaded");
            if state.info.is_empty() {
                self.db.delete(Table::PlainState, address.as_slice())?;
            } else {
                self.db.put(Table::PlainState, address.as_slice().to_vec(), encode_account(&state.info))?;
            }
            for (key, value) in &state.storage {
                let mut storage_key = address.as_slice().to_vec();
                storage_key.extend_from_slice(key.as_slice());
                if *value == B256::ZERO {
                    self.db.delete(Table::PlainState, &storage_key)?;
                } else {
                    self.db.put(Table::PlainState, storage_key, value.as_slice().to_vec())?;
                }
            }
        }

        for code_hash in self.pending_codes.drain() {
            if let Some(code) = self.codes.get(&code_hash) {
                self.db.put(Table::Code, code_hash.as_slice().to_vec(), code.to_vec())?;
            }
        }

        Ok(())
    }

    /// Reverts `address`'s overlay entry to `prior` (or to empty, if `prior` is `None`), bypassing
    /// the per-transaction journal. Used only by the Blockchain Driver's unwind path, which reads
    /// `prior` back out of `Table::AccountChangeSet` via [`crate::codec::decode_account_opt`].
    pub fn apply_unwind_account(&mut self, address: Address, prior: Option<Account>) {
        match prior {
            Some(account) => self.accounts.entry(address).or_default().info = account,
            None => {
                self.accounts.insert(address, AccountState::default());
            }
        }
    }

    pub fn apply_unwind_storage(&mut self, address: Address, key: B256, prior: B256) {
        self.accounts.entry(address).or_default().storage.insert(key, prior);
    }

    /// Reverts every account/storage mutation buffered for the current block, without touching
    /// the database — the in-memory counterpart to [`CacheState::apply_unwind_account`]/
    /// [`CacheState::apply_unwind_storage`], used by the Blockchain Driver when a block fails
    /// post-validation before `write_to_db` is ever called, so its overlay does not retain a
    /// rejected block's effects.
    pub fn discard_block_changes(&mut self) {
        let accounts: Vec<(Address, Option<Account>)> = self.block_changes.accounts.drain().collect();
        for (address, prior) in accounts {
            self.apply_unwind_account(address, prior);
        }
        let storage: Vec<((Address, B256), B256)> = self.block_changes.storage.drain().collect();
        for ((address, key), prior) in storage {
            self.apply_unwind_storage(address, key, prior);
        }
    }

    pub fn database_mut(&mut self) -> &mut dyn Database {
        self.db.as_mut()
    }

    pub fn database(&self) -> &dyn Database {
        self.db.as_ref()
    }

    /// Computes the post-state root over every account this overlay currently knows about.
    ///
    /// Hashing addresses and storage keys is the caller's job (§4.G: Keccak-256 is consumed
    /// through a narrow interface, not owned by this core), so both are supplied as callbacks.
    pub fn state_root(
        &self,
        hash_address: impl Fn(Address) -> B256,
        hash_storage_key: impl Fn(B256) -> B256,
        trie: &dyn RootHasher,
    ) -> B256 {
        let mut account_entries: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        for (address, state) in &self.accounts {
            if state.info.is_empty() {
                continue;
            }
            let mut storage_entries: Vec<(Vec<u8>, Vec<u8>)> = state
                .storage
                .iter()
                .filter(|(_, value)| **value != B256::ZERO)
                .map(|(key, value)| {
                    let hashed_key = hash_storage_key(*key).as_slice().to_vec();
                    let value = alloy_rlp::encode(U256::from_be_slice(value.as_slice()));
                    (hashed_key, value)
                })
                .collect();
            storage_entries.sort();
            let storage_root = trie.root_hash_from_entries(&storage_entries);

            let trie_account = TrieAccount {
                nonce: state.info.nonce,
                balance: state.info.balance,
                storage_root,
                code_hash: state.info.bytecode_hash.unwrap_or(Account::EMPTY_CODE_HASH),
            };
            let mut encoded = Vec::new();
            alloy_rlp::Encodable::encode(&trie_account, &mut encoded);
            account_entries.push((hash_address(*address).as_slice().to_vec(), encoded));
        }
        account_entries.sort();
        trie.root_hash_from_entries(&account_entries)
    }
}

/// Decodes a change-set row written by [`CacheState::write_to_db`]'s `AccountChangeSet` table.
pub fn decode_account_change_set_value(bytes: &[u8]) -> Option<Account> {
    decode_account_opt(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_db::InMemoryDatabase;
    use execore_storage_api::EmptyStateProvider;

    fn empty_state() -> CacheState {
        CacheState::new(Box::new(InMemoryDatabase::new()), Box::new(EmptyStateProvider))
    }

    #[test]
    fn balance_mutation_is_visible_immediately() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.add_to_balance(addr, U256::from(100u64));
        assert_eq!(state.get_balance(addr), U256::from(100u64));
    }

    #[test]
    fn checkpoint_revert_undoes_balance_and_storage_changes() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.add_to_balance(addr, U256::from(100u64));
        let checkpoint = state.checkpoint();
        state.add_to_balance(addr, U256::from(50u64));
        state.set_storage(addr, B256::repeat_byte(2), B256::repeat_byte(3));
        state.revert_to_checkpoint(checkpoint);
        assert_eq!(state.get_balance(addr), U256::from(100u64));
        assert_eq!(state.get_storage(addr, B256::repeat_byte(2)), B256::ZERO);
    }

    #[test]
    fn access_account_returns_cold_only_once() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(9);
        assert!(state.access_account(addr));
        assert!(!state.access_account(addr));
    }

    #[test]
    fn clear_journal_and_substate_clears_logs_and_access_lists() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.access_account(addr);
        state.push_log(Log { address: addr, topics: vec![], data: Bytes::new() });
        state.add_refund(10);
        state.clear_journal_and_substate();
        assert!(!state.access_accounts.contains(&addr));
        assert!(state.logs().is_empty());
        assert_eq!(state.get_refund(), 0);
    }

    #[test]
    fn destruct_suicides_zeroes_the_account_without_resurrecting_provider_state() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.add_to_balance(addr, U256::from(100u64));
        state.record_suicide(addr, Address::repeat_byte(2));
        state.destruct_suicides();
        assert_eq!(state.get_balance(addr), U256::ZERO);
        assert_eq!(state.get_balance(Address::repeat_byte(2)), U256::from(100u64));
    }

    #[test]
    fn write_to_db_persists_touched_accounts_and_their_prior_values() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.add_to_balance(addr, U256::from(100u64));
        state.write_to_db(1).unwrap();

        let stored = state.database().get(Table::PlainState, addr.as_slice()).unwrap();
        assert!(stored.is_some());
        assert_eq!(decode_account(&stored.unwrap()).unwrap().balance, U256::from(100u64));

        let mut change_key = 1u64.to_be_bytes().to_vec();
        change_key.extend_from_slice(addr.as_slice());
        let prior = state.database().get(Table::AccountChangeSet, &change_key).unwrap().unwrap();
        assert_eq!(decode_account_change_set_value(&prior), None);
    }

    #[test]
    fn discard_block_changes_undoes_mutations_without_touching_the_database() {
        let mut state = empty_state();
        let addr = Address::repeat_byte(1);
        state.add_to_balance(addr, U256::from(100u64));
        state.set_storage(addr, B256::repeat_byte(2), B256::repeat_byte(3));
        state.discard_block_changes();
        assert_eq!(state.get_balance(addr), U256::ZERO);
        assert_eq!(state.get_storage(addr, B256::repeat_byte(2)), B256::ZERO);
        assert_eq!(state.database().get(Table::PlainState, addr.as_slice()).unwrap(), None);
    }

    #[test]
    fn empty_state_root_matches_the_trie_empty_root() {
        let state = empty_state();
        let root = state.state_root(|a| B256::from_slice(a.as_slice()), |k| k, &execore_trie_common::OrderedTrieRoot);
        assert_eq!(root, alloy_trie::EMPTY_ROOT_HASH);
    }

    /// Property P4 (journal inverse): an arbitrary sequence of balance and storage mutations
    /// applied after a checkpoint, then reverted, must restore exactly the values observed right
    /// before the checkpoint was taken — regardless of how many times each was mutated in between.
    mod journal_inverse {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            AddBalance(u64),
            SubBalance(u64),
            SetStorage(u8, u64),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<u64>().prop_map(Op::AddBalance),
                any::<u64>().prop_map(Op::SubBalance),
                (any::<u8>(), any::<u64>()).prop_map(|(slot, value)| Op::SetStorage(slot, value)),
            ]
        }

        fn apply(state: &mut CacheState, addr: Address, op: &Op) {
            match *op {
                Op::AddBalance(amount) => state.add_to_balance(addr, U256::from(amount)),
                Op::SubBalance(amount) => state.subtract_from_balance(addr, U256::from(amount)),
                Op::SetStorage(slot, value) => {
                    state.set_storage(addr, B256::with_last_byte(slot), B256::from(U256::from(value)))
                }
            }
        }

        proptest! {
            #[test]
            fn revert_to_checkpoint_restores_pre_checkpoint_values(
                setup in proptest::collection::vec(op_strategy(), 0..8),
                after in proptest::collection::vec(op_strategy(), 0..8),
            ) {
                let addr = Address::repeat_byte(0x11);
                let mut state = empty_state();
                for op in &setup {
                    apply(&mut state, addr, op);
                }

                let balance_before = state.get_balance(addr);
                let storage_before: Vec<B256> = (0u8..=4)
                    .map(|slot| state.get_storage(addr, B256::with_last_byte(slot)))
                    .collect();

                let checkpoint = state.checkpoint();
                for op in &after {
                    apply(&mut state, addr, op);
                }
                state.revert_to_checkpoint(checkpoint);

                prop_assert_eq!(state.get_balance(addr), balance_before);
                for (slot, expected) in storage_before.into_iter().enumerate() {
                    prop_assert_eq!(state.get_storage(addr, B256::with_last_byte(slot as u8)), expected);
                }
            }
        }
    }
}
