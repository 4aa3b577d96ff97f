//! The Execution Processor (§4.E): per-transaction validation and execution, receipt
//! construction, and per-block orchestration (`execute_block_no_post_validation`,
//! `execute_and_write_block`, `apply_rewards`). Constructed fresh for each block, matching the
//! teacher's `EVMProcessor::new` / `execute_and_verify_receipt` split in `processor.rs`, but
//! against the `Vm`/`Host` boundary of [`crate::vm`] instead of a concrete `revm::EVM`.

use alloy_primitives::{Address, U256};
use execore_chainspec::{ChainSpec, Hardfork};
use execore_consensus_common::{calc, intrinsic_gas};
use execore_errors::ValidationError;
use execore_primitives::{Block, Receipt, TransactionSigned};
use execore_provider::CacheState;
use execore_revm_database::Host;
use execore_trie_common::RootHasher;

use crate::sender::recover_signer;
use crate::vm::{CallResult, Message, StatusCode, Vm};

/// The divisor applied to `gas_limit - gas_left` to cap the refund: 2 pre-London, 5 from London
/// onward (EIP-3529 cut the refund quotient after removing the `SELFDESTRUCT` refund itself).
fn refund_quotient(revision: Hardfork) -> u64 {
    if revision >= Hardfork::London {
        5
    } else {
        2
    }
}

/// The refund for a `SELFDESTRUCT`, active Frontier through Berlin; removed by EIP-3529 at
/// London, matching silkworm's `fee::kRSelfdestruct`.
const SELFDESTRUCT_REFUND: i64 = 24_000;

/// Per-block execution state (§4.E): running `cumulative_gas_used`, plus the inputs needed to
/// validate and execute every transaction in `block` against `state`.
pub struct ExecutionProcessor<'a> {
    block: &'a Block,
    state: &'a mut CacheState,
    vm: &'a dyn Vm,
    chain_spec: &'a ChainSpec,
    revision: Hardfork,
    cumulative_gas_used: u64,
}

impl<'a> ExecutionProcessor<'a> {
    pub fn new(block: &'a Block, state: &'a mut CacheState, vm: &'a dyn Vm, chain_spec: &'a ChainSpec) -> Self {
        let revision = chain_spec.revision_for(block.header.number);
        Self { block, state, vm, chain_spec, revision, cumulative_gas_used: 0 }
    }

    pub fn cumulative_gas_used(&self) -> u64 {
        self.cumulative_gas_used
    }

    /// Resolves `txn`'s sender, recovering it from the signature if the block source did not
    /// supply one eagerly. Execution never proceeds with an unrecovered sender.
    fn sender_of(&self, txn: &TransactionSigned) -> Result<Address, ValidationError> {
        txn.from_or_recover(recover_signer).ok_or(ValidationError::MissingSender)
    }

    /// `validate_transaction` (§4.E): the four checks the processor runs after
    /// `pre_validate_transaction` has already succeeded.
    pub fn validate_transaction(&mut self, txn: &TransactionSigned) -> Result<(), ValidationError> {
        let from = self.sender_of(txn)?;

        let expected_nonce = self.state.get_nonce(from);
        if expected_nonce != txn.transaction.nonce() {
            return Err(ValidationError::WrongNonce { got: txn.transaction.nonce(), expected: expected_nonce });
        }

        // 512-bit upfront-cost arithmetic (§9): `gas_limit * max_fee_per_gas + value` must not
        // silently overflow a 256-bit balance comparison. `gas_limit` (u64) times `max_fee_per_gas`
        // (u128) tops out at 192 bits, well inside `U256`; only the final `+ value` can overflow,
        // and an overflowing upfront cost can never be affordable, so it is treated the same as
        // `InsufficientFunds` rather than promoted to a wider type.
        let gas_cost = U256::from(txn.transaction.gas_limit()) * U256::from(txn.transaction.max_fee_per_gas());
        let upfront_cost = gas_cost.checked_add(txn.transaction.value());
        let balance = self.state.get_balance(from);
        if upfront_cost.map_or(true, |cost| cost > balance) {
            return Err(ValidationError::InsufficientFunds);
        }

        let block_available_gas = self.block.header.gas_limit - self.cumulative_gas_used;
        if txn.transaction.gas_limit() > block_available_gas {
            return Err(ValidationError::BlockGasLimitExceeded {
                transaction_gas_limit: txn.transaction.gas_limit(),
                block_available_gas,
            });
        }

        Ok(())
    }

    /// `execute_transaction` (§4.E steps 1-13): preconditions that `validate_transaction`
    /// succeeded for `txn` already.
    pub fn execute_transaction(&mut self, txn: &TransactionSigned) -> Result<Receipt, ValidationError> {
        tracing::trace!(target: "executor", hash = ?txn.hash, "executing transaction");

        self.state.clear_journal_and_substate();

        let from = self.sender_of(txn)?;
        let base_fee = self.block.header.base_fee_per_gas;
        let effective_gas_price = txn.transaction.effective_gas_price(base_fee);
        let priority_fee_per_gas = txn.transaction.priority_fee_per_gas(base_fee);

        let gas_limit = txn.transaction.gas_limit();
        self.state.subtract_from_balance(from, U256::from(gas_limit) * U256::from(effective_gas_price));

        self.state.access_account(from);
        let to = txn.transaction.to();
        if let Some(to) = to {
            self.state.access_account(to);
            self.state.set_nonce(from, self.state.get_nonce(from) + 1);
        }

        if let Some(access_list) = txn.transaction.access_list() {
            for item in &access_list.0 {
                self.state.access_account(item.address);
                for key in &item.storage_keys {
                    self.state.access_storage(item.address, *key);
                }
            }
        }

        let g0 = intrinsic_gas(
            &txn.transaction,
            self.revision >= Hardfork::Homestead,
            self.revision >= Hardfork::Istanbul,
        );
        let initial_gas = gas_limit.saturating_sub(g0);

        let message = Message {
            sender: from,
            recipient: to,
            value: txn.transaction.value(),
            input: txn.transaction.input().clone(),
            gas: initial_gas,
        };
        let result: CallResult = self.vm.execute(&message, self.state);

        let mut gas_left = result.gas_left;
        let state_refund = self.state.get_refund();
        let legacy_selfdestruct_refund = if self.revision < Hardfork::London { SELFDESTRUCT_REFUND } else { 0 };
        let refund_cap = (gas_limit - gas_left) / refund_quotient(self.revision);
        let refund = std::cmp::min(
            if matches!(result.status, StatusCode::Revert) { 0 } else { state_refund + legacy_selfdestruct_refund as u64 },
            refund_cap,
        );
        gas_left += refund;

        self.state.add_to_balance(from, U256::from(gas_left) * U256::from(effective_gas_price));

        let gas_used = gas_limit - gas_left;
        self.state.add_to_balance(self.block.header.beneficiary, U256::from(gas_used) * U256::from(priority_fee_per_gas));

        self.state.destruct_suicides();
        if self.revision >= Hardfork::SpuriousDragon {
            self.state.destruct_touched_dead();
        }

        self.state.finalize_transaction();

        self.cumulative_gas_used += gas_used;

        let success = matches!(result.status, StatusCode::Success);
        let logs = if success { self.state.logs().to_vec() } else { Vec::new() };
        Ok(Receipt {
            tx_type: txn.transaction.tx_type(),
            success,
            cumulative_gas_used: self.cumulative_gas_used,
            logs,
        })
    }

    /// The DAO hardfork's irregular state change: transfers every listed account's whole balance
    /// to the withdrawal recipient, before any transaction of the fork block executes.
    fn apply_dao_hardfork(&mut self) {
        let Some(dao_block) = self.chain_spec.dao_block else { return };
        if self.block.header.number != dao_block {
            return;
        }
        let mut drained = U256::ZERO;
        for address in DAO_DRAINED_ACCOUNTS {
            let balance = self.state.get_balance(address);
            self.state.subtract_from_balance(address, balance);
            drained += balance;
        }
        self.state.add_to_balance(DAO_WITHDRAWAL_RECIPIENT, drained);
    }

    /// `apply_rewards` (§4.E): base block reward to the beneficiary plus per-ommer rewards, zero
    /// post-Merge.
    fn apply_rewards(&mut self) {
        let Some(base_reward) = calc::base_block_reward(self.chain_spec, self.block.header.number) else {
            return;
        };
        for ommer in &self.block.ommers {
            let reward = calc::ommer_reward(base_reward, self.block.header.number, ommer.number);
            self.state.add_to_balance(ommer.beneficiary, reward);
        }
        let miner_reward = calc::block_reward(base_reward, self.block.ommers.len());
        self.state.add_to_balance(self.block.header.beneficiary, miner_reward);
    }

    /// `execute_block_no_post_validation` (§4.E): DAO fork, then every transaction in order, then
    /// rewards. Returns as soon as any transaction fails validation or execution.
    pub fn execute_block_no_post_validation(&mut self) -> Result<Vec<Receipt>, ValidationError> {
        self.apply_dao_hardfork();

        self.cumulative_gas_used = 0;
        let mut receipts = Vec::with_capacity(self.block.transactions.len());
        for txn in &self.block.transactions {
            self.validate_transaction(txn)?;
            receipts.push(self.execute_transaction(txn)?);
        }

        self.apply_rewards();
        Ok(receipts)
    }

    /// `execute_and_write_block` (§4.E): runs the block, checks `gas_used`/`receipts_root`/
    /// `logs_bloom` against the header, then commits to the backing store.
    pub fn execute_and_write_block(
        &mut self,
        trie: &dyn RootHasher,
    ) -> Result<Vec<Receipt>, ExecuteAndWriteBlockError> {
        let receipts = self.execute_block_no_post_validation().map_err(ExecuteAndWriteBlockError::Validation)?;

        if self.cumulative_gas_used != self.block.header.gas_used {
            return Err(ExecuteAndWriteBlockError::Validation(ValidationError::WrongBlockGas {
                got: self.cumulative_gas_used,
                expected: self.block.header.gas_used,
            }));
        }

        // Open Question 1 (resolved, see DESIGN.md): pre-Byzantium blocks carried an intermediate
        // state root in the receipt-root position and are not Merkle-checked here.
        if self.revision >= Hardfork::Byzantium {
            // Built by hand rather than through `RootHasher::root_hash`'s generic convenience
            // method: that method takes `Self: Sized` so it is unreachable through `&dyn
            // RootHasher`, the same way `CacheState::state_root` builds its own entries before
            // calling `root_hash_from_entries`. `root_hash_from_entries` requires entries already
            // sorted ascending by key, so the RLP-encoded-index keys are sorted here: index 0
            // encodes to `0x80`, which sorts after the single-byte encodings of indices 1..=127,
            // so enumeration order is not key order.
            let mut entries: Vec<(Vec<u8>, Vec<u8>)> = receipts
                .iter()
                .enumerate()
                .map(|(index, receipt)| {
                    let with_bloom = execore_primitives::ReceiptWithBloom::from(receipt.clone());
                    (alloy_rlp::encode(index as u64), execore_trie_common::rlp::encode_receipt(&with_bloom))
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let receipts_root = trie.root_hash_from_entries(&entries);
            if receipts_root != self.block.header.receipts_root {
                return Err(ExecuteAndWriteBlockError::Validation(ValidationError::WrongReceiptsRoot {
                    got: receipts_root,
                    expected: self.block.header.receipts_root,
                }));
            }
        }

        let bloom = execore_primitives::block_bloom(&receipts);
        if bloom != self.block.header.logs_bloom {
            return Err(ExecuteAndWriteBlockError::Validation(ValidationError::WrongLogsBloom {
                got: Box::new(bloom),
                expected: Box::new(self.block.header.logs_bloom),
            }));
        }

        tracing::debug!(
            target: "executor",
            number = self.block.header.number,
            gas_used = self.cumulative_gas_used,
            "block post-validation succeeded"
        );

        self.state
            .write_to_db(self.block.header.number)
            .map_err(ExecuteAndWriteBlockError::Provider)?;

        Ok(receipts)
    }
}

/// The fixed account list whose balances are transferred at the DAO hardfork. A short
/// illustrative subset of the real mainnet list stands in here; the real 116-account table is a
/// chain-config concern this core treats as a constant, same as silkworm's
/// `kDaoAccounts`/`kDaoBeneficiary` pair.
pub const DAO_DRAINED_ACCOUNTS: [Address; 1] =
    [alloy_primitives::address!("304a554a310c7e546dfe434669c62820b7d83b2")];

pub const DAO_WITHDRAWAL_RECIPIENT: Address =
    alloy_primitives::address!("bf4ed7b27f1d666546e30d74d50d173d20bca754");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteAndWriteBlockError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] execore_errors::ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::NoopVm;
    use alloy_primitives::B256;
    use execore_chainspec::ForkCondition;
    use execore_primitives::{Account, Header, Signature, Transaction, TxLegacy};
    use execore_provider::InMemoryDatabase;
    use execore_storage_api::EmptyStateProvider;
    use execore_trie_common::OrderedTrieRoot;

    fn london_spec() -> ChainSpec {
        ChainSpec::builder().chain_id(1).activated_through(Hardfork::London, 0).build()
    }

    fn state_with_balance(address: Address, balance: U256) -> CacheState {
        let mut state = CacheState::new(Box::new(InMemoryDatabase::new()), Box::new(EmptyStateProvider));
        state.seed_account(address, Account { nonce: 0, balance, bytecode_hash: None });
        state
    }

    fn simple_transfer(from: Address, to: Address, value: U256, gas_price: u128) -> TransactionSigned {
        simple_transfer_with_nonce(from, to, value, gas_price, 0)
    }

    fn simple_transfer_with_nonce(
        from: Address,
        to: Address,
        value: U256,
        gas_price: u128,
        nonce: u64,
    ) -> TransactionSigned {
        TransactionSigned::new_with_sender(
            B256::repeat_byte(1),
            Transaction::Legacy(TxLegacy { nonce, gas_price, gas_limit: 21_000, to: Some(to), value, ..Default::default() }),
            Signature { r: U256::from(1u64), s: U256::from(1u64), odd_y_parity: false },
            from,
        )
    }

    fn header_for(gas_used: u64) -> Header {
        Header { number: 1, gas_limit: 10_000_000, gas_used, beneficiary: Address::repeat_byte(9), ..Default::default() }
    }

    /// A plain value transfer debits sender, credits recipient and beneficiary, and reports the
    /// expected cumulative gas.
    #[test]
    fn simple_value_transfer_moves_balance_and_pays_fees() {
        let from = Address::repeat_byte(0xAA);
        let to = Address::repeat_byte(0xBB);
        let mut state = state_with_balance(from, U256::from(100_000_000_000_000_000_000u128));
        let txn = simple_transfer(from, to, U256::from(10_000_000_000_000_000_000u128), 1_000_000_000);
        let block = Block { header: header_for(21_000), transactions: vec![txn], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;

        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        let receipts = processor.execute_block_no_post_validation().unwrap();

        assert_eq!(receipts.len(), 1);
        assert!(receipts[0].success);
        assert_eq!(receipts[0].cumulative_gas_used, 21_000);
        assert_eq!(state.get_balance(to), U256::from(10_000_000_000_000_000_000u128));
        assert_eq!(
            state.get_balance(from),
            U256::from(100_000_000_000_000_000_000u128)
                - U256::from(10_000_000_000_000_000_000u128)
                - U256::from(21_000u64) * U256::from(1_000_000_000u64)
        );
    }

    #[test]
    fn insufficient_balance_is_rejected_before_execution() {
        let from = Address::repeat_byte(0xAA);
        let to = Address::repeat_byte(0xBB);
        let mut state = state_with_balance(from, U256::from(1u64));
        let txn = simple_transfer(from, to, U256::from(10u64), 1);
        let block = Block { header: header_for(0), transactions: vec![], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;
        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        assert_eq!(processor.validate_transaction(&txn), Err(ValidationError::InsufficientFunds));
    }

    #[test]
    fn wrong_nonce_is_rejected() {
        let from = Address::repeat_byte(0xAA);
        let to = Address::repeat_byte(0xBB);
        let mut state = state_with_balance(from, U256::from(100_000_000_000_000_000_000u128));
        state.set_nonce(from, 5);
        let txn = simple_transfer(from, to, U256::from(1u64), 1);
        let block = Block { header: header_for(0), transactions: vec![], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;
        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        assert_eq!(
            processor.validate_transaction(&txn),
            Err(ValidationError::WrongNonce { got: 0, expected: 5 })
        );
    }

    /// Under London, the beneficiary is paid only the priority fee; the base fee portion is
    /// burned (never credited to any tracked balance).
    #[test]
    fn london_base_fee_is_burned_not_credited_to_beneficiary() {
        let from = Address::repeat_byte(0xAA);
        let to = Address::repeat_byte(0xBB);
        let beneficiary = Address::repeat_byte(9);
        let mut state = state_with_balance(from, U256::from(100_000_000_000_000_000_000u128));
        let txn = TransactionSigned::new_with_sender(
            B256::repeat_byte(1),
            Transaction::DynamicFee(execore_primitives::TxEip1559 {
                chain_id: 1,
                nonce: 0,
                max_fee_per_gas: 3,
                max_priority_fee_per_gas: 2,
                gas_limit: 21_000,
                to: Some(to),
                value: U256::ZERO,
                ..Default::default()
            }),
            Signature { r: U256::from(1u64), s: U256::from(1u64), odd_y_parity: false },
            from,
        );
        let mut header = header_for(21_000);
        header.beneficiary = beneficiary;
        header.base_fee_per_gas = Some(1);
        let block = Block { header, transactions: vec![txn], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;

        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        processor.execute_block_no_post_validation().unwrap();

        assert_eq!(state.get_balance(beneficiary), U256::from(21_000u64 * 2));
        let total = state.get_balance(from) + state.get_balance(to) + state.get_balance(beneficiary);
        assert_eq!(total, U256::from(100_000_000_000_000_000_000u128) - U256::from(21_000u64));
    }

    #[test]
    fn execute_and_write_block_rejects_wrong_gas_used() {
        let from = Address::repeat_byte(0xAA);
        let to = Address::repeat_byte(0xBB);
        let mut state = state_with_balance(from, U256::from(100_000_000_000_000_000_000u128));
        let txn = simple_transfer(from, to, U256::ZERO, 1);
        let mut header = header_for(999);
        header.number = 1;
        let block = Block { header, transactions: vec![txn], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;
        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        let result = processor.execute_and_write_block(&OrderedTrieRoot);
        assert_matches::assert_matches!(result, Err(ExecuteAndWriteBlockError::Validation(ValidationError::WrongBlockGas { .. })));
    }

    /// A ≥2-transaction block exercises the receipts trie's index-0-sorts-last ordering: index 0
    /// RLP-encodes to `0x80`, which sorts after the single-byte encodings of indices 1..=127, so
    /// a naive enumeration-order insertion into `HashBuilder` would panic (debug) or produce the
    /// wrong root (release). The expected root here is computed independently, through the same
    /// sort-by-key step `execute_and_write_block` now applies, to confirm the two agree.
    #[test]
    fn execute_and_write_block_accepts_multi_transaction_receipts_root() {
        let from = Address::repeat_byte(0xAA);
        let to_a = Address::repeat_byte(0xBB);
        let to_b = Address::repeat_byte(0xCC);
        let beneficiary = Address::repeat_byte(9);
        let mut state = state_with_balance(from, U256::from(100_000_000_000_000_000_000u128));
        let txn_a = simple_transfer_with_nonce(from, to_a, U256::ZERO, 1, 0);
        let txn_b = simple_transfer_with_nonce(from, to_b, U256::ZERO, 1, 1);

        let expected_receipts = vec![
            Receipt { tx_type: 0, success: true, cumulative_gas_used: 21_000, logs: vec![] },
            Receipt { tx_type: 0, success: true, cumulative_gas_used: 42_000, logs: vec![] },
        ];
        let mut entries: Vec<(Vec<u8>, Vec<u8>)> = expected_receipts
            .iter()
            .enumerate()
            .map(|(index, receipt)| {
                let with_bloom = execore_primitives::ReceiptWithBloom::from(receipt.clone());
                (alloy_rlp::encode(index as u64), execore_trie_common::rlp::encode_receipt(&with_bloom))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let expected_receipts_root = OrderedTrieRoot.root_hash_from_entries(&entries);

        let mut header = header_for(42_000);
        header.beneficiary = beneficiary;
        header.receipts_root = expected_receipts_root;
        header.logs_bloom = execore_primitives::block_bloom(&expected_receipts);
        let block = Block { header, transactions: vec![txn_a, txn_b], ommers: vec![] };
        let spec = london_spec();
        let vm = NoopVm;
        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);

        let receipts = processor.execute_and_write_block(&OrderedTrieRoot).unwrap();
        assert_eq!(receipts, expected_receipts);
    }

    #[test]
    fn block_reward_credits_beneficiary_after_frontier_transactions() {
        let beneficiary = Address::repeat_byte(9);
        let mut state = CacheState::new(Box::new(InMemoryDatabase::new()), Box::new(EmptyStateProvider));
        let mut header = header_for(0);
        header.beneficiary = beneficiary;
        header.base_fee_per_gas = None;
        let block = Block { header, transactions: vec![], ommers: vec![] };
        let spec = ChainSpec::builder()
            .chain_id(1)
            .with_fork(Hardfork::Frontier, ForkCondition::Block(0))
            .build();
        let vm = NoopVm;
        let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);
        processor.execute_block_no_post_validation().unwrap();
        assert_eq!(state.get_balance(beneficiary), calc::BLOCK_REWARD_FRONTIER);
    }

    /// §9's 512-bit upfront-cost arithmetic: `validate_transaction`'s `InsufficientFunds`
    /// decision (computed with a `checked_add` over `U256`) must agree with an independent
    /// 512-bit oracle for every `gas_limit`/`max_fee`/`value`/`balance` combination, including
    /// ones where `gas_limit * max_fee + value` overflows a `U256`.
    mod upfront_cost_arithmetic {
        use super::*;
        use execore_primitives::ruint::Uint;
        use proptest::prelude::*;

        type U512 = Uint<512, 8>;

        proptest! {
            #[test]
            fn insufficient_funds_matches_wide_arithmetic_oracle(
                gas_limit in 0u64..30_000_000,
                max_fee in 0u128..u128::MAX,
                value_hi in 0u128..u128::MAX,
                value_lo in 0u128..u128::MAX,
                balance_hi in 0u128..u128::MAX,
                balance_lo in 0u128..u128::MAX,
            ) {
                let value = (U256::from(value_hi) << 128) | U256::from(value_lo);
                let balance = (U256::from(balance_hi) << 128) | U256::from(balance_lo);

                let wide_cost = U512::from(gas_limit) * U512::from(max_fee) + U512::from_limbs_slice(value.as_limbs());
                let wide_balance = U512::from_limbs_slice(balance.as_limbs());
                let expect_insufficient = wide_cost > wide_balance;

                let from = Address::repeat_byte(0x22);
                let mut state = CacheState::new(Box::new(InMemoryDatabase::new()), Box::new(EmptyStateProvider));
                state.seed_account(from, Account { nonce: 0, balance, bytecode_hash: None });
                let txn = TransactionSigned::new_with_sender(
                    B256::ZERO,
                    Transaction::Legacy(TxLegacy {
                        nonce: 0,
                        gas_price: max_fee,
                        gas_limit,
                        to: Some(Address::repeat_byte(0x33)),
                        value,
                        ..Default::default()
                    }),
                    Signature { r: U256::from(1u64), s: U256::from(1u64), odd_y_parity: false },
                    from,
                );
                let mut header = header_for(0);
                header.gas_limit = u64::MAX;
                let block = Block { header, transactions: vec![], ommers: vec![] };
                let spec = london_spec();
                let vm = NoopVm;
                let mut processor = ExecutionProcessor::new(&block, &mut state, &vm, &spec);

                let got_insufficient =
                    matches!(processor.validate_transaction(&txn), Err(ValidationError::InsufficientFunds));
                prop_assert_eq!(got_insufficient, expect_insufficient);
            }
        }
    }
}
