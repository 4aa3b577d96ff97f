//! The `Host` side of §9's `Vm`/`Host` boundary: the World State capability surface a `Vm`
//! implementation is handed during `CALL`/`CREATE` execution, decoupled from the concrete
//! [`CacheState`] type the same way `revm::Database` decouples an interpreter from a concrete
//! state backend.

use alloy_primitives::{Address, Bytes, B256, U256};
use execore_errors::ProviderError;
use execore_primitives::Log;
use execore_provider::CacheState;

/// Everything a `Vm` implementation needs from the World State to execute one message.
///
/// Every method here has a same-named inherent method on [`CacheState`]; this trait exists so the
/// VM Adapter (`crates/revm/revm-executor`) can be written against an interface instead of the
/// concrete store, matching §9's note that the VM is treated as an external capability with its
/// own narrow boundary back into this core.
pub trait Host {
    fn get_balance(&mut self, address: Address) -> U256;
    fn add_to_balance(&mut self, address: Address, amount: U256);
    fn subtract_from_balance(&mut self, address: Address, amount: U256);

    fn get_nonce(&mut self, address: Address) -> u64;
    fn set_nonce(&mut self, address: Address, nonce: u64);

    fn get_code(&mut self, address: Address) -> Bytes;
    fn get_code_hash(&mut self, address: Address) -> B256;
    fn set_code(&mut self, address: Address, code_hash: B256, code: Bytes);

    fn get_storage(&mut self, address: Address, key: B256) -> B256;
    fn set_storage(&mut self, address: Address, key: B256, value: B256);

    /// Returns whether `address` was previously cold (EIP-2929).
    fn access_account(&mut self, address: Address) -> bool;
    fn access_storage(&mut self, address: Address, key: B256) -> bool;

    fn record_suicide(&mut self, address: Address, beneficiary: Address);
    fn destruct_suicides(&mut self);
    fn destruct_touched_dead(&mut self);

    fn get_refund(&self) -> u64;
    fn add_refund(&mut self, delta: i64) -> u64;

    fn push_log(&mut self, log: Log);
    fn logs(&self) -> &[Log];

    fn checkpoint(&mut self) -> usize;
    fn revert_to_checkpoint(&mut self, checkpoint: usize);

    fn clear_journal_and_substate(&mut self);
    fn finalize_transaction(&mut self);
    fn write_to_db(&mut self, block_number: u64) -> Result<(), ProviderError>;
}

impl Host for CacheState {
    fn get_balance(&mut self, address: Address) -> U256 {
        CacheState::get_balance(self, address)
    }

    fn add_to_balance(&mut self, address: Address, amount: U256) {
        CacheState::add_to_balance(self, address, amount)
    }

    fn subtract_from_balance(&mut self, address: Address, amount: U256) {
        CacheState::subtract_from_balance(self, address, amount)
    }

    fn get_nonce(&mut self, address: Address) -> u64 {
        CacheState::get_nonce(self, address)
    }

    fn set_nonce(&mut self, address: Address, nonce: u64) {
        CacheState::set_nonce(self, address, nonce)
    }

    fn get_code(&mut self, address: Address) -> Bytes {
        CacheState::get_code(self, address)
    }

    fn get_code_hash(&mut self, address: Address) -> B256 {
        CacheState::get_code_hash(self, address)
    }

    fn set_code(&mut self, address: Address, code_hash: B256, code: Bytes) {
        CacheState::set_code(self, address, code_hash, code)
    }

    fn get_storage(&mut self, address: Address, key: B256) -> B256 {
        CacheState::get_storage(self, address, key)
    }

    fn set_storage(&mut self, address: Address, key: B256, value: B256) {
        CacheState::set_storage(self, address, key, value)
    }

    fn access_account(&mut self, address: Address) -> bool {
        CacheState::access_account(self, address)
    }

    fn access_storage(&mut self, address: Address, key: B256) -> bool {
        CacheState::access_storage(self, address, key)
    }

    fn record_suicide(&mut self, address: Address, beneficiary: Address) {
        CacheState::record_suicide(self, address, beneficiary)
    }

    fn destruct_suicides(&mut self) {
        CacheState::destruct_suicides(self)
    }

    fn destruct_touched_dead(&mut self) {
        CacheState::destruct_touched_dead(self)
    }

    fn get_refund(&self) -> u64 {
        CacheState::get_refund(self)
    }

    fn add_refund(&mut self, delta: i64) -> u64 {
        CacheState::add_refund(self, delta)
    }

    fn push_log(&mut self, log: Log) {
        CacheState::push_log(self, log)
    }

    fn logs(&self) -> &[Log] {
        CacheState::logs(self)
    }

    fn checkpoint(&mut self) -> usize {
        CacheState::checkpoint(self)
    }

    fn revert_to_checkpoint(&mut self, checkpoint: usize) {
        CacheState::revert_to_checkpoint(self, checkpoint)
    }

    fn clear_journal_and_substate(&mut self) {
        CacheState::clear_journal_and_substate(self)
    }

    fn finalize_transaction(&mut self) {
        CacheState::finalize_transaction(self)
    }

    fn write_to_db(&mut self, block_number: u64) -> Result<(), ProviderError> {
        CacheState::write_to_db(self, block_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use execore_provider::InMemoryDatabase;
    use execore_storage_api::EmptyStateProvider;

    fn host() -> CacheState {
        CacheState::new(Box::new(InMemoryDatabase::new()), Box::new(EmptyStateProvider))
    }

    #[test]
    fn host_trait_methods_forward_to_the_underlying_cache_state() {
        let mut state = host();
        let address = Address::repeat_byte(4);
        Host::add_to_balance(&mut state, address, U256::from(42u64));
        assert_eq!(Host::get_balance(&mut state, address), U256::from(42u64));
    }
}
