use alloy_primitives::{Address, Bytes, B256};
use execore_errors::ProviderError;
use execore_primitives::Account;

/// Read-only access to historical/persisted account and code state, used by the World State
/// (`CacheState`) to satisfy reads that miss its in-memory overlay.
///
/// Mirrors `reth-storage-api`'s `AccountReader`/`StateProvider` split, collapsed into one trait
/// since this core has no separate block-hash or proof-generation surface to keep apart.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait StateProvider: Send + Sync {
    fn basic_account(&self, address: Address) -> Result<Option<Account>, ProviderError>;
    fn storage(&self, address: Address, key: B256) -> Result<B256, ProviderError>;
    fn code_by_hash(&self, code_hash: B256) -> Result<Option<Bytes>, ProviderError>;
}

/// A [`StateProvider`] over an always-empty store, for constructing a [`crate::Database`]-backed
/// `CacheState` that starts from genesis allocation already written into the plain-state table
/// rather than from a historical provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStateProvider;

impl StateProvider for EmptyStateProvider {
    fn basic_account(&self, _address: Address) -> Result<Option<Account>, ProviderError> {
        Ok(None)
    }

    fn storage(&self, _address: Address, _key: B256) -> Result<B256, ProviderError> {
        Ok(B256::ZERO)
    }

    fn code_by_hash(&self, _code_hash: B256) -> Result<Option<Bytes>, ProviderError> {
        Ok(None)
    }
}
